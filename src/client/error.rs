use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("not logged in; run `login` or `register` first")]
    NotAuthenticated,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
