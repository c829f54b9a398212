//! Error types for inkpost
//!
//! Frontmatter parsing itself never fails; these errors cover loading
//! posts and config from disk, rendering pages, and writing the site.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for inkpost operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Post Errors
    // ==========================================================================
    #[error("Post '{slug}' not found")]
    PostNotFound { slug: String },

    #[error("Post '{slug}' already exists")]
    PostAlreadyExists { slug: String },

    #[error("Invalid slug '{value}': {reason}")]
    InvalidSlug { value: String, reason: String },

    // ==========================================================================
    // Config Errors
    // ==========================================================================
    #[error("Failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    // ==========================================================================
    // Rendering Errors
    // ==========================================================================
    #[error("Template error: {message}")]
    Template { message: String },

    // ==========================================================================
    // IO Errors
    // ==========================================================================
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==========================================================================
    // Serialization Errors
    // ==========================================================================
    #[error("Failed to serialize JSON: {message}")]
    Json { message: String },

    // ==========================================================================
    // Catch-all
    // ==========================================================================
    #[error("{0}")]
    Other(String),
}

/// Result type alias for inkpost operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
        }
    }
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part (which template, which line) in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        Error::Template { message }
    }
}

impl From<crate::validation::ValidationError> for Error {
    fn from(err: crate::validation::ValidationError) -> Self {
        use crate::validation::ValidationError;
        match err {
            ValidationError::InvalidSlug(value, reason) => Error::InvalidSlug {
                value,
                reason: reason.to_string(),
            },
            ValidationError::TooLong(value, max) => Error::InvalidSlug {
                value,
                reason: format!("exceeds maximum length of {}", max),
            },
            ValidationError::Empty => Error::InvalidSlug {
                value: String::new(),
                reason: "cannot be empty".to_string(),
            },
            ValidationError::Reserved(value) => Error::InvalidSlug {
                value,
                reason: "reserved name".to_string(),
            },
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
            Error::PostNotFound { .. } => Some("Run `inkpost list` to see available posts"),
            Error::PostAlreadyExists { .. } => Some("Pick another slug or edit the existing file"),
            Error::InvalidSlug { .. } => {
                Some("Use only letters, numbers, underscores, and hyphens")
            }
            Error::ConfigParse { .. } => Some(
                "Known keys: title, description, posts_dir, output_dir, base_url, highlight",
            ),
            _ => None,
        }
    }
}
