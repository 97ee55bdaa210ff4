//! Error types for the MySQL store.

use thiserror::Error;

/// Errors that can occur while talking to MySQL.
#[derive(Error, Debug)]
pub enum MySQLSeedError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// A value read back from MySQL could not be parsed.
    #[error("Invalid value for {column}: '{value}'")]
    InvalidValue { column: &'static str, value: String },
}
