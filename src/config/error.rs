//! Error types for tuning data loading.

use thiserror::Error;

/// Errors that can occur when loading or validating game data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    Read { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// Data parsed but holds values the layout cannot work with.
    #[error("Invalid game data: {0}")]
    Invalid(String),
}
