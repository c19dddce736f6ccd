//! # SurfsUp Database Crate
//!
//! This crate is the application's read-only window onto the pre-populated
//! climate database (a single SQLite file with `measurement` and `station`
//! tables).
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the workspace sees typed
//!   records from `core-types` and never a query string.
//! - **Read-only:** The file is opened read-only and is never created or migrated.
//!   `verify_schema` checks at start-up that the tables carry the expected columns.
//! - **Scoped sessions:** Each repository operation acquires one pooled connection
//!   for its whole duration; it is returned to the pool on drop, whether the
//!   operation succeeded or failed.
//!
//! ## Public API
//!
//! - `connect`: opens the read-only connection pool.
//! - `verify_schema`: binds the known record types to the existing schema.
//! - `ClimateRepository`: the query layer.
//! - `DbError`: the error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{ActiveStation, ClimateRepository, TOBS_WINDOW_DAYS};
pub use schema::verify_schema;
