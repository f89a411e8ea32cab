use posts_shared::ServerErrors;
use serde_json::Value;
use thiserror::Error;

/// Failure of one gateway call. Cloneable so a store can keep the message in
/// its state and still hand the raw failure to a caller.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error: {status}")]
    Status { status: u16, body: Value },
    #[error("Parse error: {0}")]
    Decode(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Original response body of a non-2xx reply.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status {
                body, ..
            } => Some(body),
            _ => None,
        }
    }

    pub fn server_errors(&self) -> ServerErrors {
        self.body().map(ServerErrors::from_value).unwrap_or_default()
    }

    /// Human readable message stored in a store's `error` field.
    pub fn message(&self) -> String {
        if let ApiError::Status {
            ..
        } = self
        {
            let errors = self.server_errors();
            if let Some(message) = errors.message() {
                return message.to_string();
            }
            let lines = errors.messages();
            if !lines.is_empty() {
                return lines.join("; ");
            }
        }
        self.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
