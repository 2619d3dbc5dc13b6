use serde_json::Value;
use thiserror::Error;

/// Failure of a single call against the Record Store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No response was received.
    #[error("network error: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// A success response whose body could not be read as records.
    #[error("unreadable response: {0}")]
    Decode(String),
    /// Rejected locally before anything was sent.
    #[error("{0}")]
    Invalid(String),
}

impl SyncError {
    /// Builds a `Server` error from a failed response body.
    ///
    /// A JSON `message` field wins; any other JSON is kept as its compact
    /// text; a plain-text body is kept as-is; an empty body falls back to
    /// the bare status line.
    pub fn from_response(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            generic_status_message(status)
        } else {
            match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Object(map)) => match map.get("message") {
                    Some(Value::String(message)) if !message.is_empty() => message.clone(),
                    _ => Value::Object(map).to_string(),
                },
                Ok(other) => other.to_string(),
                Err(_) => trimmed.to_string(),
            }
        };

        SyncError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub fn generic_status_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::Decode(err.to_string())
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}
