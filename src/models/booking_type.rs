use serde::{Deserialize, Serialize};

use super::type_fields::{
    AppointmentFields, CruiseFields, FieldDescriptor, FlightFields, HotelFields,
    InsuranceFields, TicketFields, TransportationFields, VisaFields,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookingType {
    Hotel,
    Flight,
    Cruise,
    Visa,
    Appointment,
    Insurance,
    Ticket,
    Transportation,
}

impl BookingType {
    pub const ALL: [BookingType; 8] = [
        BookingType::Hotel,
        BookingType::Flight,
        BookingType::Cruise,
        BookingType::Visa,
        BookingType::Appointment,
        BookingType::Insurance,
        BookingType::Ticket,
        BookingType::Transportation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Hotel => "Hotel",
            BookingType::Flight => "Flight",
            BookingType::Cruise => "Cruise",
            BookingType::Visa => "Visa",
            BookingType::Appointment => "Appointment",
            BookingType::Insurance => "Insurance",
            BookingType::Ticket => "Ticket",
            BookingType::Transportation => "Transportation",
        }
    }

    /// Case-insensitive parse of a type tag. Unknown tags yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    /// Ordered field descriptors for this type.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            BookingType::Hotel => HotelFields::FIELDS,
            BookingType::Flight => FlightFields::FIELDS,
            BookingType::Cruise => CruiseFields::FIELDS,
            BookingType::Visa => VisaFields::FIELDS,
            BookingType::Appointment => AppointmentFields::FIELDS,
            BookingType::Insurance => InsuranceFields::FIELDS,
            BookingType::Ticket => TicketFields::FIELDS,
            BookingType::Transportation => TransportationFields::FIELDS,
        }
    }

    /// Supplier payment statuses the UI offers for this type.
    pub fn payment_statuses(&self) -> &'static [PaymentStatus] {
        use PaymentStatus::*;
        match self {
            BookingType::Hotel => &[Paid, Unpaid],
            BookingType::Flight
            | BookingType::Cruise
            | BookingType::Ticket
            | BookingType::Transportation => &[Confirmed, Pending, Cancelled],
            BookingType::Visa => &[Pending, Approved, Rejected],
            BookingType::Appointment => &[Pending, Completed, Cancelled],
            BookingType::Insurance => &[Active, Expired, Cancelled],
        }
    }

    /// Date field that drives the "upcoming" reminder highlight.
    pub fn reminder_field(&self) -> &'static str {
        match self {
            BookingType::Hotel => "checkInDate",
            BookingType::Flight | BookingType::Cruise => "departureDate",
            BookingType::Visa | BookingType::Appointment => "applicationDate",
            BookingType::Insurance => "startDate",
            BookingType::Ticket => "eventDate",
            BookingType::Transportation => "transportationDate",
        }
    }
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry lookup by raw tag. An unrecognized tag has no fields, which the UI
/// renders as the "select a type" placeholder.
pub fn fields_for(tag: &str) -> &'static [FieldDescriptor] {
    BookingType::parse(tag).map(|t| t.fields()).unwrap_or(&[])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
    Confirmed,
    Pending,
    Approved,
    Completed,
    Rejected,
    Cancelled,
    Active,
    Expired,
}

impl PaymentStatus {
    const ALL: [PaymentStatus; 10] = [
        PaymentStatus::Paid,
        PaymentStatus::Unpaid,
        PaymentStatus::Confirmed,
        PaymentStatus::Pending,
        PaymentStatus::Approved,
        PaymentStatus::Completed,
        PaymentStatus::Rejected,
        PaymentStatus::Cancelled,
        PaymentStatus::Active,
        PaymentStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Confirmed => "Confirmed",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Approved => "Approved",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Rejected => "Rejected",
            PaymentStatus::Cancelled => "Cancelled",
            PaymentStatus::Active => "Active",
            PaymentStatus::Expired => "Expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    Hold,
    Issued,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Hold,
        BookingStatus::Issued,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Hold => "Hold",
            BookingStatus::Issued => "Issued",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(BookingType::parse("hotel"), Some(BookingType::Hotel));
        assert_eq!(BookingType::parse(" TRANSPORTATION "), Some(BookingType::Transportation));
        assert_eq!(BookingType::parse("Spaceship"), None);
    }

    #[test]
    fn test_fields_for_known_type() {
        let keys: Vec<&str> = fields_for("Hotel").iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                "hotelName",
                "bookingNumber",
                "checkInDate",
                "checkOutDate",
                "numberOfGuests",
                "numberOfRooms",
                "roomType",
            ]
        );
    }

    #[test]
    fn test_fields_for_unknown_type_is_empty() {
        assert!(fields_for("").is_empty());
        assert!(fields_for("Spaceship").is_empty());
    }

    #[test]
    fn test_every_type_has_fields_and_statuses() {
        for ty in BookingType::ALL {
            assert!(!ty.fields().is_empty(), "{ty} has no fields");
            assert!(!ty.payment_statuses().is_empty(), "{ty} has no payment statuses");
            assert!(
                ty.fields().iter().any(|f| f.key == ty.reminder_field()),
                "{ty} reminder field is not one of its fields"
            );
        }
    }

    #[test]
    fn test_payment_statuses_per_type() {
        assert_eq!(
            BookingType::Hotel.payment_statuses(),
            &[PaymentStatus::Paid, PaymentStatus::Unpaid]
        );
        assert_eq!(
            BookingType::Insurance.payment_statuses(),
            &[PaymentStatus::Active, PaymentStatus::Expired, PaymentStatus::Cancelled]
        );
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(BookingStatus::default(), BookingStatus::Hold);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
        assert_eq!(BookingStatus::parse("issued"), Some(BookingStatus::Issued));
        assert_eq!(PaymentStatus::parse("nope"), None);
    }
}
