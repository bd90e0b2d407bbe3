//! CLI error types.

use unimark_client::ClientError;
use unimark_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}

impl CliError {
    /// Follow-up advice printed after the error message.
    pub(crate) fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Client(err) if err.is_unauthorized() => {
                Some("Check client.token in unimark.toml or pass --token.")
            }
            _ => None,
        }
    }
}
