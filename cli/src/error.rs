#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use routedoc_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the document builder.
    #[display("{}", _0)]
    Core(AppError),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Core(AppError::Json(err))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Core(AppError::Yaml(err))
    }
}

/// Manual implementation of the standard Error trait, since `General(String)`
/// has no source to derive from.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CliError::General("no route files".into());
        assert_eq!(err.to_string(), "Operation failed: no route files");

        let core = CliError::from(AppError::InvalidSchemaSource("expected object".into()));
        assert_eq!(core.to_string(), "Invalid schema source: expected object");
    }

    #[test]
    fn test_parse_errors_map_to_core() {
        let err: CliError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CliError::Core(AppError::Json(_))));
    }
}
