use async_trait::async_trait;
use serde_json::Value;

use super::{unwrap_envelope, Credential, ReservationApi, TransportError};
use crate::models::WirePayload;

pub struct HttpReservationApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpReservationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turns a backend response into JSON, or a `Status` error carrying the
/// backend's `message` (or `error`) field when the body has one.
async fn read_body(resp: reqwest::Response) -> Result<Value, TransportError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text).ok().and_then(|body| {
            ["message", "error"]
                .iter()
                .find_map(|k| body.get(*k).and_then(Value::as_str).map(str::to_string))
        });
        tracing::warn!(status = status.as_u16(), message = ?message, "reservations backend error");
        return Err(TransportError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text)
        .map(unwrap_envelope)
        .map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn list(&self, credential: &Credential) -> Result<Vec<Value>, TransportError> {
        let resp = self
            .client
            .get(self.url("reservations"))
            .bearer_auth(credential.token())
            .send()
            .await?;

        match read_body(resp).await? {
            Value::Array(items) => Ok(items),
            other => Err(TransportError::Decode(format!(
                "expected a list of reservations, got {other}"
            ))),
        }
    }

    async fn fetch(&self, credential: &Credential, id: &str) -> Result<Value, TransportError> {
        let resp = self
            .client
            .get(self.url(&format!("reservations/{id}")))
            .bearer_auth(credential.token())
            .send()
            .await?;

        read_body(resp).await
    }

    async fn update(
        &self,
        credential: &Credential,
        id: &str,
        payload: &WirePayload,
    ) -> Result<Value, TransportError> {
        tracing::debug!(booking_id = id, "PUT reservation");
        let resp = self
            .client
            .put(self.url(&format!("reservations/{id}")))
            .bearer_auth(credential.token())
            .json(payload)
            .send()
            .await?;

        read_body(resp).await
    }

    async fn create(
        &self,
        credential: &Credential,
        payload: &WirePayload,
    ) -> Result<Value, TransportError> {
        tracing::debug!(booking_type = %payload.booking_type, "POST reservation");
        let resp = self
            .client
            .post(self.url("reservations"))
            .bearer_auth(credential.token())
            .json(payload)
            .send()
            .await?;

        read_body(resp).await
    }
}
