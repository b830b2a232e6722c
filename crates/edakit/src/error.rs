//! Error types for the edakit library.

use thiserror::Error;

use crate::schema::ColumnType;

/// Main error type for edakit operations.
#[derive(Debug, Error)]
pub enum EdaError {
    /// An enumerated parameter (filter mode, correlation method, sort key)
    /// or a table construction argument was outside its accepted set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced column does not exist in the table.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// A numeric operation was requested on a column that cannot be coerced
    /// to numbers.
    #[error("Column '{column}' has type {dtype} and cannot be used as a numeric column")]
    IncompatibleType { column: String, dtype: ColumnType },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for edakit operations.
pub type Result<T> = std::result::Result<T, EdaError>;
