use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid task service url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("task service url must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("task service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("task service responded with {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("malformed task service response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Human-readable detail the service attached to a failed response, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
