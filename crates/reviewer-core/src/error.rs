//! Error types for Reviewer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewerError {
    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Remote call errors
    #[error("Failed to reach the generative API: {reason}")]
    Transport { reason: String },

    #[error("Generative API rejected the request ({status}): {message}")]
    RemoteRejection { status: u16, message: String },

    #[error("Malformed response from the generative API: {reason}")]
    MalformedResponse { reason: String },

    #[error("Response blocked by the generative API: {reason}")]
    Blocked { reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReviewerError {
    /// True when the failure happened before any remote call was attempted
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigMissing { .. } | Self::ConfigInvalid { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReviewerError>;
