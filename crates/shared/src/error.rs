use thiserror::Error;

/// Failures talking to the economy backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The backend answered with an error status and a human-readable detail.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered 2xx but the body did not parse.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl BackendError {
    /// Best-available message for the user: backend detail verbatim,
    /// otherwise the underlying error's own message.
    pub fn detail_or_message(&self) -> &str {
        match self {
            BackendError::Api { detail, .. } => detail,
            BackendError::Transport(message) | BackendError::Decode(message) => message,
        }
    }
}
