use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde_json::Value;

use crate::models::BookingRecord;
use crate::services::encoder::encode;
use crate::services::form::BookingForm;
use crate::services::reconcile::reconcile;
use crate::services::reservations::{Credential, ReservationApi, TransportError};
use crate::services::validation::{SubmitMode, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("booking is invalid")]
    Validation(Vec<ValidationError>),

    #[error("a save for booking {0} is already in progress")]
    InFlight(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Ids of bookings with an update request currently outstanding.
#[derive(Debug, Default)]
pub struct InFlight {
    ids: Mutex<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `id`, or returns `None` if another save already holds it.
    pub fn try_begin(&self, id: &str) -> Option<InFlightGuard<'_>> {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        if ids.insert(id.to_string()) {
            Some(InFlightGuard {
                owner: self,
                id: id.to_string(),
            })
        } else {
            None
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
    }
}

/// Releases the claimed id when the save finishes, however it finishes.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}

/// Loads, lists and saves bookings against the reservations backend.
pub struct BookingService {
    api: Box<dyn ReservationApi>,
    in_flight: InFlight,
}

/// Row of the bookings table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: Option<String>,
    pub booking_type: Option<String>,
    pub customer_name: String,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: rust_decimal::Decimal,
    pub upcoming: bool,
}

impl BookingSummary {
    pub fn from_record(record: &BookingRecord, today: NaiveDate) -> Self {
        Self {
            id: record.id.clone(),
            booking_type: record.booking_type().map(|t| t.to_string()),
            customer_name: record.customer.name.clone(),
            status: record.status.as_str().to_string(),
            net_profit: record.financial.net_profit(),
            upcoming: record.is_upcoming(today),
        }
    }
}

impl BookingService {
    pub fn new(api: Box<dyn ReservationApi>) -> Self {
        Self {
            api,
            in_flight: InFlight::new(),
        }
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    pub async fn list(&self, credential: &Credential) -> Result<Vec<BookingRecord>, TransportError> {
        let items = self.api.list(credential).await?;
        Ok(items.iter().map(reconcile).collect())
    }

    pub async fn load(&self, credential: &Credential, id: &str) -> Result<BookingRecord, TransportError> {
        let payload = self.api.fetch(credential, id).await?;
        Ok(reconcile(&payload))
    }

    /// Validates, encodes and PUTs the form, then re-fetches the stored
    /// booking. A second save for the same id while one is outstanding is
    /// rejected rather than sent.
    pub async fn submit_update(
        &self,
        credential: &Credential,
        form: &mut BookingForm,
    ) -> Result<BookingRecord, SubmitError> {
        form.validate(SubmitMode::Update)
            .map_err(SubmitError::Validation)?;

        let id = form.record().id.clone().unwrap_or_default();
        let _guard = match self.in_flight.try_begin(&id) {
            Some(guard) => guard,
            None => {
                tracing::warn!(booking_id = %id, "rejected overlapping save");
                return Err(SubmitError::InFlight(id));
            }
        };

        let payload = encode(form.record());
        self.api.update(credential, &id, &payload).await?;
        tracing::info!(booking_id = %id, booking_type = %payload.booking_type, "booking updated");

        self.load(credential, &id).await.map_err(SubmitError::from)
    }

    /// Validates, encodes and POSTs a new booking; returns the stored record.
    pub async fn submit_create(
        &self,
        credential: &Credential,
        form: &mut BookingForm,
    ) -> Result<BookingRecord, SubmitError> {
        form.validate(SubmitMode::Create)
            .map_err(SubmitError::Validation)?;

        let payload = encode(form.record());
        let created = self.api.create(credential, &payload).await?;

        let record = match &created {
            Value::Object(_) => reconcile(&created),
            _ => {
                return Err(TransportError::Decode(
                    "create response did not contain a booking".to_string(),
                )
                .into())
            }
        };
        tracing::info!(booking_id = ?record.id, booking_type = %payload.booking_type, "booking created");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let in_flight = InFlight::new();
        {
            let _guard = in_flight.try_begin("7").unwrap();
            assert!(in_flight.contains("7"));
            assert!(in_flight.try_begin("7").is_none());
            assert!(in_flight.try_begin("8").is_some());
        }
        assert!(!in_flight.contains("7"));
        assert!(in_flight.try_begin("7").is_some());
    }

    #[test]
    fn test_summary_from_record() {
        use crate::models::{BookingType, Financial};

        let mut record = BookingRecord::new(BookingType::Ticket);
        record.id = Some("9".to_string());
        record.customer.name = "Jane Doe".to_string();
        record.financial = Financial::new("120", "", "100");
        record.set_type_field("eventDate", "2025-06-17T20:00:00");

        let today = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let summary = BookingSummary::from_record(&record, today);
        assert_eq!(summary.booking_type.as_deref(), Some("Ticket"));
        assert_eq!(summary.net_profit, rust_decimal::Decimal::from(20));
        assert!(summary.upcoming);
    }
}
