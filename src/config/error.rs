//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
///
/// Every variant is fatal at startup; nothing here is retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set (or was blank).
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// A numeric setting could not be parsed.
    #[error("failed to parse {name} '{value}': {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The attempt budget must allow at least one call.
    #[error("invalid max tries '{value}': must be at least 1")]
    InvalidMaxTries { value: u32 },

    /// Acceptance threshold is outside the cosine range.
    #[error("invalid threshold {value}: must be between -1.0 and 1.0")]
    InvalidThreshold { value: f32 },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The HTTP client for the transformation service could not be built.
    #[error("failed to build HTTP client: {reason}")]
    HttpClient { reason: String },

    /// The system prompt file exists but could not be read.
    #[error("failed to load system prompt from {path}: {source}")]
    PromptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
