use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// `Display` is the message shown to the learner.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a failure envelope or a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response carried no data")]
    EmptyData,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
