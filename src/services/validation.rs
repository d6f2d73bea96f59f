use crate::models::BookingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

/// Pre-submit failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingCustomerName,

    #[error("booking type is required")]
    MissingBookingType,

    #[error("booking id is required to update")]
    MissingRecordId,
}

impl ValidationError {
    /// Form key the error is shown next to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingCustomerName => "customer.name",
            ValidationError::MissingBookingType => "bookingType",
            ValidationError::MissingRecordId => "id",
        }
    }
}

pub fn validate(record: &BookingRecord, mode: SubmitMode) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if mode == SubmitMode::Update && record.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
        errors.push(ValidationError::MissingRecordId);
    }
    if record.customer.name.trim().is_empty() {
        errors.push(ValidationError::MissingCustomerName);
    }
    if record.booking_type().is_none() {
        errors.push(ValidationError::MissingBookingType);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
