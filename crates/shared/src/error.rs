use serde::{Deserialize, Serialize};

/// Error body the backend sends with non-2xx responses: `{"detail": ...}`.
///
/// `detail` is usually a string but validation failures carry a structured
/// list, so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: serde_json::Value,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: serde_json::Value::String(detail.into()),
        }
    }

    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
