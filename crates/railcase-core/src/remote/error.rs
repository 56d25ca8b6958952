use thiserror::Error;

/// Errors that can occur talking to the test-management service.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote returned error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
}

impl RemoteError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        RemoteError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Whether this is a lookup miss rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound { .. })
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err.to_string())
    }
}
