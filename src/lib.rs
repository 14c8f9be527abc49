pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use config::Config;
pub use db::SpacecraftStorage;
pub use error::SpacedockError;
pub use router::{SpacedockState, spacedock_router};
