use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::{BookingRecord, BookingType};
use crate::services::form::{BookingForm, FormError};
use crate::services::projection::{project_for_view, EditField, ViewField};
use crate::services::reservations::Credential;
use crate::services::submission::BookingSummary;
use crate::state::AppState;

/// The caller's bearer token, forwarded untouched to the backend.
fn credential(headers: &HeaderMap) -> Result<Credential, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match auth.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Credential::bearer(token.trim())),
        _ => Err(AppError::Unauthorized),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    id: Option<String>,
    booking_type: Option<BookingType>,
    fields: Vec<ViewField>,
}

impl From<&BookingRecord> for BookingView {
    fn from(record: &BookingRecord) -> Self {
        Self {
            id: record.id.clone(),
            booking_type: record.booking_type(),
            fields: project_for_view(record),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormResponse {
    id: Option<String>,
    booking_type: Option<BookingType>,
    fields: Vec<EditField>,
}

impl From<&BookingForm> for BookingFormResponse {
    fn from(form: &BookingForm) -> Self {
        Self {
            id: form.record().id.clone(),
            booking_type: form.record().booking_type(),
            fields: form.fields(),
        }
    }
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let credential = credential(&headers)?;

    let records = state
        .bookings
        .list(&credential)
        .await
        .map_err(|e| AppError::upstream(e, "failed to load bookings"))?;

    let today = chrono::Local::now().date_naive();
    Ok(Json(
        records
            .iter()
            .map(|r| BookingSummary::from_record(r, today))
            .collect(),
    ))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingView>, AppError> {
    let credential = credential(&headers)?;
    let record = load(&state, &credential, &id).await?;
    Ok(Json(BookingView::from(&record)))
}

// GET /api/bookings/:id/form
pub async fn get_booking_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingFormResponse>, AppError> {
    let credential = credential(&headers)?;
    let record = load(&state, &credential, &id).await?;
    Ok(Json(BookingFormResponse::from(&BookingForm::edit(record))))
}

// GET /api/bookings/new
#[derive(Deserialize)]
pub struct NewBookingQuery {
    #[serde(rename = "type")]
    pub booking_type: Option<String>,
}

pub async fn new_booking_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<NewBookingQuery>,
) -> Result<Json<BookingFormResponse>, AppError> {
    credential(&headers)?;
    let form = new_form(&state, query.booking_type.as_deref())?;
    Ok(Json(BookingFormResponse::from(&form)))
}

// PUT /api/bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(changes): Json<Map<String, Value>>,
) -> Result<Json<BookingView>, AppError> {
    let credential = credential(&headers)?;

    let mut record = load(&state, &credential, &id).await?;
    if record.id.is_none() {
        record.id = Some(id.clone());
    }

    let mut form = BookingForm::edit(record);
    apply_changes(&mut form, &changes)?;

    let saved = state
        .bookings
        .submit_update(&credential, &mut form)
        .await
        .map_err(|e| AppError::submit(e, "update failed"))?;

    Ok(Json(BookingView::from(&saved)))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(changes): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<BookingView>), AppError> {
    let credential = credential(&headers)?;

    let mut form = new_form(&state, None)?;
    apply_changes(&mut form, &changes)?;

    let saved = state
        .bookings
        .submit_create(&credential, &mut form)
        .await
        .map_err(|e| AppError::submit(e, "create failed"))?;

    Ok((StatusCode::CREATED, Json(BookingView::from(&saved))))
}

async fn load(state: &AppState, credential: &Credential, id: &str) -> Result<BookingRecord, AppError> {
    state
        .bookings
        .load(credential, id)
        .await
        .map_err(|e| AppError::upstream(e, "failed to load booking"))
}

fn new_form(state: &AppState, booking_type: Option<&str>) -> Result<BookingForm, AppError> {
    let ty = match booking_type {
        Some(raw) => BookingType::parse(raw).ok_or_else(|| FormError::InvalidValue {
            key: "bookingType".to_string(),
            value: raw.to_string(),
        })?,
        None => BookingType::Hotel,
    };

    let mut record = BookingRecord::new(ty);
    record.reminder_days = state.config.default_reminder_days;
    Ok(BookingForm::edit(record))
}

/// Applies a `{key: value}` batch of edits. The type switch goes first so the
/// remaining keys land in the newly selected field set.
fn apply_changes(form: &mut BookingForm, changes: &Map<String, Value>) -> Result<(), AppError> {
    if let Some(value) = changes.get("bookingType") {
        form.set_field("bookingType", &input_text("bookingType", value)?)?;
    }

    for (key, value) in changes.iter().filter(|(k, _)| k.as_str() != "bookingType") {
        form.set_field(key, &input_text(key, value)?)?;
    }

    Ok(())
}

fn input_text(key: &str, value: &Value) -> Result<String, FormError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(FormError::InvalidValue {
            key: key.to_string(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_requires_bearer() {
        let mut headers = HeaderMap::new();
        assert!(matches!(credential(&headers), Err(AppError::Unauthorized)));

        headers.insert("authorization", "Basic abc".parse().unwrap());
        assert!(matches!(credential(&headers), Err(AppError::Unauthorized)));

        headers.insert("authorization", "Bearer tok-1".parse().unwrap());
        assert_eq!(credential(&headers).unwrap().token(), "tok-1");
    }

    #[test]
    fn test_apply_changes_switches_type_first() {
        let mut form = BookingForm::create(BookingType::Hotel);
        let changes = json!({
            "airline": "Emirates",
            "bookingType": "Flight",
            "customer.name": "Jane Doe",
            "sellPrice": 900,
        });
        apply_changes(&mut form, changes.as_object().unwrap()).unwrap();
        assert_eq!(form.record().booking_type(), Some(BookingType::Flight));
        assert_eq!(form.record().type_field("airline"), Some("Emirates"));
        assert_eq!(form.record().financial.sell_price(), "900");
    }

    #[test]
    fn test_apply_changes_rejects_nested_values() {
        let mut form = BookingForm::create(BookingType::Hotel);
        let changes = json!({ "notes": { "text": "hi" } });
        assert!(matches!(
            apply_changes(&mut form, changes.as_object().unwrap()),
            Err(AppError::Form(FormError::InvalidValue { .. }))
        ));
    }
}
