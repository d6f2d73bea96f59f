use axum::Json;
use serde::Serialize;

use crate::models::{BookingType, FieldDescriptor};

// GET /api/booking-types
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTypeInfo {
    #[serde(rename = "type")]
    booking_type: &'static str,
    fields: &'static [FieldDescriptor],
    payment_statuses: Vec<&'static str>,
    reminder_field: &'static str,
}

pub async fn get_booking_types() -> Json<Vec<BookingTypeInfo>> {
    let types = BookingType::ALL
        .iter()
        .map(|ty| BookingTypeInfo {
            booking_type: ty.as_str(),
            fields: ty.fields(),
            payment_statuses: ty.payment_statuses().iter().map(|p| p.as_str()).collect(),
            reminder_field: ty.reminder_field(),
        })
        .collect();

    Json(types)
}
