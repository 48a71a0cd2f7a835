//! Error types for image listing resolution.

/// Errors that can occur while listing image URLs.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The server answered with a non-success status
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The request never produced a response (network error, CORS, ...)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The listing body was not the expected JSON
    #[error("Malformed listing: {0}")]
    Json(#[from] serde_json::Error),

    /// The directory index could not be parsed
    #[error("Could not parse directory index: {0}")]
    Html(String),
}

impl SourceError {
    /// Build a transport error from anything printable, e.g. a `JsValue`.
    pub fn transport(url: &str, message: impl std::fmt::Debug) -> Self {
        SourceError::Transport {
            url: url.to_string(),
            message: format!("{:?}", message),
        }
    }
}
