use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::form::FormError;
use crate::services::reservations::TransportError;
use crate::services::submission::SubmitError;
use crate::services::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("booking is invalid")]
    Validation(Vec<ValidationError>),

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("a save for booking {0} is already in progress")]
    Busy(String),

    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },
}

impl AppError {
    /// Wraps a backend failure, showing the backend's message when it sent one.
    pub fn upstream(err: TransportError, fallback: &str) -> Self {
        AppError::Upstream {
            status: err.status(),
            message: err.user_message(fallback),
        }
    }

    pub fn submit(err: SubmitError, fallback: &str) -> Self {
        match err {
            SubmitError::Validation(errors) => AppError::Validation(errors),
            SubmitError::InFlight(id) => AppError::Busy(id),
            SubmitError::Transport(err) => AppError::upstream(err, fallback),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Form(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Busy(_) => StatusCode::CONFLICT,
            AppError::Upstream { status, .. } => match status {
                Some(404) => StatusCode::NOT_FOUND,
                Some(401) => StatusCode::UNAUTHORIZED,
                Some(403) => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_GATEWAY,
            },
        };

        let mut body = serde_json::json!({ "error": self.to_string() });
        if let AppError::Validation(errors) = &self {
            let fields: serde_json::Map<String, serde_json::Value> = errors
                .iter()
                .map(|e| (e.field().to_string(), e.to_string().into()))
                .collect();
            body["fields"] = fields.into();
        }

        (status, axum::Json(body)).into_response()
    }
}
