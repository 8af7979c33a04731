use serde_json::{json, Value};
use thiserror::Error;


#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassificationError {
    #[error("Unexpected response format from the Watson NLP API")]
    UnexpectedFormat {
        details: String,
        raw_response: Value,
    },

    #[error("Unexpected status code {status}")]
    UnexpectedStatus {
        status: u16,
        details: String,
    },

    #[error("Error communicating with the Watson NLP API")]
    Transport {
        details: String,
    },
}

impl ClassificationError {
    pub fn details(&self) -> &str {
        match self {
            Self::UnexpectedFormat { details, .. } => details,
            Self::UnexpectedStatus { details, .. } => details,
            Self::Transport { details } => details,
        }
    }

    /// Body sent back to the caller of the endpoint on a 500.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.to_string(),
            "details": self.details(),
        });
        match self {
            Self::UnexpectedFormat { raw_response, .. } => {
                body["raw_response"] = raw_response.clone();
            },
            Self::UnexpectedStatus { status, .. } => {
                body["status_code"] = json!(status);
            },
            Self::Transport { .. } => {},
        }
        body
    }
}
