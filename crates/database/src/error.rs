use std::path::PathBuf;

use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database file not found at {0}")]
    MissingDatabase(PathBuf),

    #[error("The database is unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Table '{0}' does not exist in the database")]
    MissingTable(String),

    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Stored data is inconsistent: {0}")]
    InvalidData(#[from] CoreError),
}
