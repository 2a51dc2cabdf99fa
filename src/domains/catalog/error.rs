//! Storage error types.

use thiserror::Error;

/// Result type for catalog storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a catalog store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated on field '{field}'")]
    UniqueViolation { field: String },

    /// A value does not fit the column that stores it.
    #[error("value for field '{field}' is out of range")]
    OutOfRange { field: String },

    /// The store could not be reached or is in an unusable state.
    #[error("catalog storage unavailable: {0}")]
    Unavailable(String),

    /// Error reported by SQLite.
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    /// I/O error while preparing the storage location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a unique constraint violation for the given field.
    pub fn unique_violation(field: impl Into<String>) -> Self {
        Self::UniqueViolation {
            field: field.into(),
        }
    }

    /// Create an out-of-range error for the given field.
    pub fn out_of_range(field: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.into(),
        }
    }

    /// Create an "unavailable" error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
