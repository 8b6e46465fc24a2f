//! Unified error types for Pagewright

use thiserror::Error;

/// Unified error type for all Pagewright operations
#[derive(Error, Debug)]
pub enum PagewrightError {
    // Intake errors
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Generation errors
    #[error("Generation failed: {0}")]
    Generation(String),

    // Publishing errors
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Git command failed: {0}")]
    Git(String),

    // Notification errors
    #[error("Notification failed: {0}")]
    Notify(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using PagewrightError
pub type Result<T> = std::result::Result<T, PagewrightError>;
