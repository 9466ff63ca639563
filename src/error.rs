//! Error types for Stagebook
//!
//! Provides structured error types with context for better debugging
//! and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Stagebook operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Store Errors
    // ==========================================================================
    #[error("Artist '{id}' already exists")]
    DuplicateArtist { id: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    #[error("Invalid '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    // ==========================================================================
    // Query Errors
    // ==========================================================================
    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    // ==========================================================================
    // Fallback Source Errors
    // ==========================================================================
    #[error("Request to '{url}' failed: {message}")]
    SourceFailed { url: String, message: String },

    // ==========================================================================
    // Config Errors
    // ==========================================================================
    #[error("Failed to read config '{path}': {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    // ==========================================================================
    // Serialization Errors
    // ==========================================================================
    #[error("Failed to parse YAML: {message}")]
    YamlParseError { message: String },

    #[error("Failed to parse JSON: {message}")]
    JsonParseError { message: String },
}

/// Result type alias for Stagebook operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::YamlParseError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParseError {
            message: err.to_string(),
        }
    }
}

impl From<crate::validation::ValidationError> for Error {
    fn from(err: crate::validation::ValidationError) -> Self {
        Error::InvalidField {
            field: err.field(),
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Error Display Helpers
// =============================================================================

impl Error {
    /// Returns a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::DuplicateArtist { .. } => Some("Artist IDs must be unique within the catalog"),
            Error::UnknownVariant { kind: "category", .. } => Some(
                "Use one of: singer, dj, band, comedian, dancer, magician, instrumentalist",
            ),
            Error::UnknownVariant { kind: "language", .. } => Some(
                "Use one of: english, spanish, french, german, italian, portuguese, mandarin, japanese",
            ),
            Error::InvalidField { .. } => Some("Correct the highlighted field and submit again"),
            Error::SourceFailed { .. } => Some("Check that the Stagebook server is running"),
            Error::ConfigReadError { .. } => Some("Pass an existing YAML file with --config"),
            _ => None,
        }
    }

    /// Returns true if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DuplicateArtist { .. }
                | Error::UnknownVariant { .. }
                | Error::InvalidField { .. }
                | Error::QueryFailed { .. }
                | Error::JsonParseError { .. }
                | Error::SourceFailed { .. }
        )
    }
}
