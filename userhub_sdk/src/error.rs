//! Error types for the UserHub SDK.

use thiserror::Error;

/// Errors from UserHub SDK operations.
#[derive(Error, Debug)]
pub enum UserHubError {
    /// An error surfaced by the underlying REST toolkit.
    #[error("API error: {0}")]
    Api(#[from] restkit::Error),
    /// User-provided input failed validation before a request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl UserHubError {
    /// The HTTP status code if the API answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            UserHubError::Api(e) => e.status(),
            UserHubError::InvalidInput(_) => None,
        }
    }
}
