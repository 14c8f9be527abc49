//! Database module: models, schema and storage for spacecraft records.
//!
//! Layout:
//! - `models.rs`: rows, request bodies and projections
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `update.rs`: partial UPDATE builder
//! - `sqlite.rs`: pooled storage with the record accessors

pub mod models;
pub mod schema;
pub mod sqlite;
pub mod update;

pub use models::{
    Armament, NewSpacecraft, Spacecraft, SpacecraftId, SpacecraftPatch, SpacecraftSummary,
    WriteOutcome,
};
pub use schema::SQLITE_INIT;
pub use sqlite::{SpacecraftStorage, SqlitePool};
