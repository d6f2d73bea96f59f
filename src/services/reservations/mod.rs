pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::WirePayload;

/// Bearer token supplied by the caller. The desk never stores or refreshes it.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Message from the backend body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// What to show the user: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// The reservations REST backend. Records come back as raw JSON for
/// reconciliation.
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn list(&self, credential: &Credential) -> Result<Vec<Value>, TransportError>;

    async fn fetch(&self, credential: &Credential, id: &str) -> Result<Value, TransportError>;

    async fn update(
        &self,
        credential: &Credential,
        id: &str,
        payload: &WirePayload,
    ) -> Result<Value, TransportError>;

    async fn create(
        &self,
        credential: &Credential,
        payload: &WirePayload,
    ) -> Result<Value, TransportError>;
}

/// Strips a `{"data": ...}` resource wrapper if present.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_) | Value::Array(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(unwrap_envelope(json!({ "data": { "id": 1 } })), json!({ "id": 1 }));
        assert_eq!(unwrap_envelope(json!({ "data": [1, 2] })), json!([1, 2]));
        assert_eq!(unwrap_envelope(json!({ "id": 1 })), json!({ "id": 1 }));
        assert_eq!(unwrap_envelope(json!({ "data": "x" })), json!({ "data": "x" }));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = TransportError::Status {
            status: 422,
            message: Some("The name field is required.".to_string()),
        };
        assert_eq!(err.user_message("update failed"), "The name field is required.");

        let err = TransportError::Status { status: 500, message: None };
        assert_eq!(err.user_message("update failed"), "update failed");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::bearer("secret-token");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert_eq!(credential.token(), "secret-token");
    }
}
