pub mod auth;
pub mod request;

pub use auth::RequireBasicAuth;
pub use request::ApiJson;
