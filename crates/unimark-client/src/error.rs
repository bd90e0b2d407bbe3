//! Error types for the HTTP client.

/// Error from request and stream operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned a non-2xx status).
    #[error("HTTP error: {status} - {message}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Server-provided `msg`, or a generic message.
        message: String,
    },

    /// I/O error while reading a response body.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a response error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
