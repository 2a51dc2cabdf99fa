//! Error types and handling for the server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from catalog storage.
    #[error("Storage error: {0}")]
    Storage(#[from] crate::domains::catalog::StoreError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::StoreError;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_error_conversions() {
        let err: Error = ToolError::not_found("x").into();
        assert_eq!(err.to_string(), "Tool error: Unknown tool: x");

        let err: Error = StoreError::unique_violation("sku").into();
        assert_eq!(
            err.to_string(),
            "Storage error: unique constraint violated on field 'sku'"
        );
    }
}
