//! Error types for the toolkit.

/// Errors produced by the REST adapter and toolkit helpers.
///
/// The taxonomy is intentionally flat: every failure an SDK built on this
/// crate can surface is one of these five kinds.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be constructed: bad adapter configuration,
    /// an unparseable URL, an invalid header, or an unserializable body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The transport failed before a complete response was received.
    #[error("request failed")]
    Request(#[source] reqwest::Error),

    /// The request timed out, either while connecting or reading.
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    /// The response payload was expected to be JSON but could not be parsed.
    #[error("bad JSON in response")]
    Response(#[source] serde_json::Error),

    /// The server answered with a non-success HTTP status. `body` carries a
    /// truncated snippet of the response body for diagnostics.
    #[error("request failed with status {status}: {message}")]
    Status {
        status: u16,
        message: String,
        body: String,
    },
}

impl Error {
    /// The HTTP status code for [`Error::Status`], `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
