use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

/// Error body returned by the task service on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// `detail` is a plain message for application errors and a list of entries
/// for request validation errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationEntry>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationEntry {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Message(message) => {
                let message = message.trim();
                (!message.is_empty()).then(|| message.to_string())
            }
            ErrorDetail::Validation(entries) => entries.iter().find_map(|entry| {
                let msg = entry.msg.as_deref()?.trim();
                (!msg.is_empty()).then(|| msg.to_string())
            }),
        }
    }
}
