use std::collections::BTreeMap;

use crate::models::{BookingRecord, BookingStatus, BookingType, PaymentStatus};
use crate::services::projection::{project_for_edit, EditField, FieldPath};
use crate::services::validation::{validate, SubmitMode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field is read-only: {0}")]
    ReadOnly(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Working copy of a booking while it is being created or edited.
#[derive(Debug, Clone)]
pub struct BookingForm {
    record: BookingRecord,
    errors: BTreeMap<String, ValidationError>,
}

impl BookingForm {
    pub fn create(ty: BookingType) -> Self {
        Self::edit(BookingRecord::new(ty))
    }

    pub fn edit(record: BookingRecord) -> Self {
        Self {
            record,
            errors: BTreeMap::new(),
        }
    }

    pub fn record(&self) -> &BookingRecord {
        &self.record
    }

    pub fn into_record(self) -> BookingRecord {
        self.record
    }

    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn fields(&self) -> Vec<EditField> {
        project_for_edit(&self.record)
    }

    /// Applies one user edit. A successful edit clears any error recorded
    /// against that key; a rejected one leaves the record untouched.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        let invalid = || FormError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match FieldPath::parse(key) {
            FieldPath::BookingType => {
                let ty = if value.trim().is_empty() {
                    None
                } else {
                    Some(BookingType::parse(value).ok_or_else(invalid)?)
                };
                self.record.set_booking_type(ty);
            }
            FieldPath::CustomerName => self.record.customer.name = value.to_string(),
            FieldPath::CustomerPhone => self.record.customer.phone = value.to_string(),
            FieldPath::SupplierName => self.record.supplier.name = value.to_string(),
            FieldPath::PaymentStatus => {
                self.record.supplier.payment_status =
                    PaymentStatus::parse(value).ok_or_else(invalid)?;
            }
            FieldPath::Amount(input) => self.record.financial.set_input(input, value),
            FieldPath::NetProfit | FieldPath::SupplierPhone | FieldPath::ReminderDays => {
                return Err(FormError::ReadOnly(key.to_string()))
            }
            FieldPath::Status => {
                self.record.status = BookingStatus::parse(value).ok_or_else(invalid)?;
            }
            FieldPath::Notes => self.record.notes = value.to_string(),
            FieldPath::Detail(detail) => {
                if !self.record.set_type_field(&detail, value) {
                    return Err(FormError::UnknownField(detail));
                }
            }
        }

        self.errors.remove(key);
        Ok(())
    }

    /// Runs pre-submit validation, recording each failure against its field.
    pub fn validate(&mut self, mode: SubmitMode) -> Result<(), Vec<ValidationError>> {
        self.errors.clear();
        validate(&self.record, mode).map_err(|errors| {
            for error in &errors {
                self.errors.insert(error.field().to_string(), error.clone());
            }
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_create_defaults_to_hold() {
        let form = BookingForm::create(BookingType::Hotel);
        assert_eq!(form.record().status, BookingStatus::Hold);
        assert_eq!(form.record().id, None);
    }

    #[test]
    fn test_money_edits_recompute_net_profit() {
        let mut form = BookingForm::create(BookingType::Hotel);
        form.set_field("sellPrice", "1000").unwrap();
        form.set_field("fees", "50").unwrap();
        form.set_field("cost", "300").unwrap();
        assert_eq!(form.record().financial.net_profit(), Decimal::from(650));

        form.set_field("fees", "oops").unwrap();
        assert_eq!(form.record().financial.net_profit(), Decimal::from(700));
    }

    #[test]
    fn test_net_profit_is_read_only() {
        let mut form = BookingForm::create(BookingType::Hotel);
        let err = form.set_field("netProfit", "1").unwrap_err();
        assert_eq!(err, FormError::ReadOnly("netProfit".to_string()));
    }

    #[test]
    fn test_edit_clears_field_error() {
        let mut form = BookingForm::create(BookingType::Hotel);
        let errors = form.validate(SubmitMode::Create).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingCustomerName]);
        assert!(form.errors().contains_key("customer.name"));

        form.set_field("customer.name", "Jane Doe").unwrap();
        assert!(form.errors().is_empty());
        assert!(form.validate(SubmitMode::Create).is_ok());
    }

    #[test]
    fn test_unrelated_edit_keeps_other_errors() {
        let mut form = BookingForm::create(BookingType::Hotel);
        let _ = form.validate(SubmitMode::Update);
        form.set_field("notes", "vip").unwrap();
        assert!(form.errors().contains_key("customer.name"));
        assert!(form.errors().contains_key("id"));
    }

    #[test]
    fn test_type_switch_keeps_hidden_fields() {
        let mut form = BookingForm::create(BookingType::Hotel);
        form.set_field("hotelName", "Grand").unwrap();
        form.set_field("bookingType", "Cruise").unwrap();
        assert!(form.fields().iter().all(|f| f.key != "hotelName"));

        form.set_field("bookingType", "hotel").unwrap();
        assert_eq!(form.record().type_field("hotelName"), Some("Grand"));
    }

    #[test]
    fn test_blank_booking_type_clears_selection() {
        let mut form = BookingForm::create(BookingType::Hotel);
        form.set_field("bookingType", "").unwrap();
        assert_eq!(form.record().booking_type(), None);
        let errors = form.validate(SubmitMode::Create).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingBookingType));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut form = BookingForm::create(BookingType::Hotel);
        assert!(matches!(
            form.set_field("bookingType", "Spaceship"),
            Err(FormError::InvalidValue { .. })
        ));
        assert!(matches!(
            form.set_field("status", "Archived"),
            Err(FormError::InvalidValue { .. })
        ));
        assert_eq!(form.record().booking_type(), Some(BookingType::Hotel));
    }

    #[test]
    fn test_fields_missing_from_update_body_are_read_only() {
        let mut form = BookingForm::create(BookingType::Hotel);
        assert_eq!(
            form.set_field("supplier.phone", "+15550002222"),
            Err(FormError::ReadOnly("supplier.phone".to_string()))
        );
        assert_eq!(
            form.set_field("reminderDays", "7"),
            Err(FormError::ReadOnly("reminderDays".to_string()))
        );
        assert_eq!(form.record().supplier.phone, "");
        assert_eq!(form.record().reminder_days, 3);
    }

    #[test]
    fn test_field_of_other_type_rejected() {
        let mut form = BookingForm::create(BookingType::Hotel);
        assert_eq!(
            form.set_field("flightNumber", "EK1"),
            Err(FormError::UnknownField("flightNumber".to_string()))
        );
    }

    #[test]
    fn test_supplier_and_status_edits() {
        let mut form = BookingForm::create(BookingType::Insurance);
        form.set_field("supplier.paymentStatus", "active").unwrap();
        form.set_field("status", "Issued").unwrap();
        assert_eq!(form.record().supplier.payment_status, PaymentStatus::Active);
        assert_eq!(form.record().status, BookingStatus::Issued);
    }
}
