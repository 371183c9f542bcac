//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Only `InvalidSchemaSource` is raised by the conversion itself; the
/// remaining variants cover loading inputs and serializing documents.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML (de)serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A validator value that cannot be introspected into a structural description.
    #[from(ignore)]
    #[display("Invalid schema source: {_0}")]
    InvalidSchemaSource(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
