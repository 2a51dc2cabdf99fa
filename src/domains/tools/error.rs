//! Tool-specific error types.

use thiserror::Error;

/// Failures of the dispatch machinery itself.
///
/// Argument violations and storage failures are not represented here; they
/// become text responses and never leave the dispatcher.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The call arguments were not a JSON object.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Arguments passed validation but did not fit the tool's parameter
    /// record. Indicates a schema and record that disagree.
    #[error("Arguments for {tool} do not match its parameter record: {source}")]
    ParamsMismatch {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn params_mismatch(tool: &'static str, source: serde_json::Error) -> Self {
        Self::ParamsMismatch { tool, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ToolError::not_found("drop-table").to_string(),
            "Unknown tool: drop-table"
        );

        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let err = ToolError::params_mismatch("create-product", source);
        assert!(
            err.to_string()
                .starts_with("Arguments for create-product do not match its parameter record")
        );
    }
}
