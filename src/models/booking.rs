use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::booking_type::{BookingStatus, BookingType, PaymentStatus};
use super::financial::Financial;
use super::type_fields::{date_portion, TypeFields};

pub const DEFAULT_REMINDER_DAYS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub name: String,
    pub phone: String,
    pub payment_status: PaymentStatus,
}

/// One reservation as the desk works with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// `None` until the backend has stored the booking.
    pub id: Option<String>,
    pub customer: Customer,
    pub supplier: Supplier,
    pub financial: Financial,
    pub status: BookingStatus,
    pub notes: String,
    pub reminder_days: u32,
    #[serde(flatten)]
    details: Option<TypeFields>,
    /// Field sets of previously selected types, restored when switched back.
    #[serde(skip)]
    shelved: BTreeMap<BookingType, TypeFields>,
    /// The `reservable` object exactly as the server sent it.
    #[serde(skip)]
    pub reservable: Map<String, Value>,
}

impl BookingRecord {
    pub fn new(ty: BookingType) -> Self {
        Self {
            id: None,
            customer: Customer::default(),
            supplier: Supplier::default(),
            financial: Financial::default(),
            status: BookingStatus::default(),
            notes: String::new(),
            reminder_days: DEFAULT_REMINDER_DAYS,
            details: Some(TypeFields::empty(ty)),
            shelved: BTreeMap::new(),
            reservable: Map::new(),
        }
    }

    /// Record whose type tag was missing or unrecognized.
    pub fn untyped() -> Self {
        Self {
            details: None,
            ..Self::new(BookingType::Hotel)
        }
    }

    pub fn booking_type(&self) -> Option<BookingType> {
        self.details.as_ref().map(TypeFields::booking_type)
    }

    pub fn details(&self) -> Option<&TypeFields> {
        self.details.as_ref()
    }

    pub fn type_field(&self, key: &str) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    /// Returns false when the active type has no field named `key`.
    pub fn set_type_field(&mut self, key: &str, value: &str) -> bool {
        match self.details.as_mut() {
            Some(details) => details.set(key, value),
            None => false,
        }
    }

    /// Switches the active type. Fields of the outgoing type are shelved, not
    /// dropped, and only the active type's fields are ever submitted.
    pub fn set_booking_type(&mut self, ty: Option<BookingType>) {
        if self.booking_type() == ty {
            return;
        }
        if let Some(current) = self.details.take() {
            self.shelved.insert(current.booking_type(), current);
        }
        self.details = ty.map(|ty| {
            self.shelved
                .remove(&ty)
                .unwrap_or_else(|| TypeFields::empty(ty))
        });
    }

    pub fn has_shelved(&self, ty: BookingType) -> bool {
        self.shelved.contains_key(&ty)
    }

    /// Date portion of the type's reminder field, if it parses.
    pub fn reminder_date(&self) -> Option<NaiveDate> {
        let ty = self.booking_type()?;
        let raw = self.type_field(ty.reminder_field())?;
        NaiveDate::parse_from_str(date_portion(raw), "%Y-%m-%d").ok()
    }

    /// True when the reminder date falls within `reminder_days` from `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        match self.reminder_date() {
            Some(date) => {
                let days = (date - today).num_days();
                days >= 0 && days <= i64::from(self.reminder_days)
            }
            None => false,
        }
    }
}

impl Default for BookingRecord {
    fn default() -> Self {
        BookingRecord::new(BookingType::Hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_record_defaults() {
        let record = BookingRecord::default();
        assert_eq!(record.id, None);
        assert_eq!(record.booking_type(), Some(BookingType::Hotel));
        assert_eq!(record.status, BookingStatus::Hold);
        assert_eq!(record.supplier.payment_status, PaymentStatus::Unpaid);
        assert_eq!(record.reminder_days, 3);
    }

    #[test]
    fn test_switching_type_shelves_fields() {
        let mut record = BookingRecord::new(BookingType::Hotel);
        assert!(record.set_type_field("hotelName", "Grand"));

        record.set_booking_type(Some(BookingType::Flight));
        assert_eq!(record.booking_type(), Some(BookingType::Flight));
        assert_eq!(record.type_field("hotelName"), None);
        assert!(record.has_shelved(BookingType::Hotel));

        record.set_booking_type(Some(BookingType::Hotel));
        assert_eq!(record.type_field("hotelName"), Some("Grand"));
        assert!(!record.has_shelved(BookingType::Hotel));
        assert!(record.has_shelved(BookingType::Flight));
    }

    #[test]
    fn test_switching_to_same_type_is_noop() {
        let mut record = BookingRecord::new(BookingType::Visa);
        record.set_type_field("country", "Japan");
        record.set_booking_type(Some(BookingType::Visa));
        assert_eq!(record.type_field("country"), Some("Japan"));
        assert!(!record.has_shelved(BookingType::Visa));
    }

    #[test]
    fn test_clearing_type() {
        let mut record = BookingRecord::new(BookingType::Ticket);
        record.set_booking_type(None);
        assert_eq!(record.booking_type(), None);
        assert!(!record.set_type_field("eventName", "Concert"));
    }

    #[test]
    fn test_upcoming_window() {
        let mut record = BookingRecord::new(BookingType::Hotel);
        record.set_type_field("checkInDate", "2025-06-18");

        assert!(record.is_upcoming(date("2025-06-15")));
        assert!(record.is_upcoming(date("2025-06-18")));
        assert!(!record.is_upcoming(date("2025-06-14")));
        assert!(!record.is_upcoming(date("2025-06-19")));
    }

    #[test]
    fn test_upcoming_uses_date_portion_of_datetimes() {
        let mut record = BookingRecord::new(BookingType::Flight);
        record.set_type_field("departureDate", "2025-06-16T23:45");
        assert!(record.is_upcoming(date("2025-06-16")));
    }

    #[test]
    fn test_not_upcoming_without_date() {
        let record = BookingRecord::new(BookingType::Insurance);
        assert!(!record.is_upcoming(date("2025-06-16")));
        assert!(!BookingRecord::untyped().is_upcoming(date("2025-06-16")));
    }
}
