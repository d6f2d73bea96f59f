//! Concrete field sets, one struct per booking type.
//!
//! Every value is held as the raw string the user typed or the server sent;
//! numeric coercion happens at encode time. The declaration order of each set
//! is the order forms and detail views render it in.

use serde::{Deserialize, Serialize};

use super::booking_type::BookingType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Date,
    DateTime,
    LongText,
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub default: &'static str,
}

impl FieldDescriptor {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind, default: &'static str) -> Self {
        Self {
            key,
            label,
            kind,
            default,
        }
    }
}

pub const TRANSPORT_TYPES: &[&str] = &["Car", "Bus", "Train", "Taxi"];

macro_rules! field_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($field:ident: $key:literal, $label:literal, $kind:expr, $default:literal;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(pub $field: String,)*
        }

        impl $name {
            pub const FIELDS: &'static [FieldDescriptor] = &[
                $(FieldDescriptor::new($key, $label, $kind, $default),)*
            ];

            pub fn get(&self, key: &str) -> Option<&str> {
                match key {
                    $($key => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }

            fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
                match key {
                    $($key => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default.to_string(),)*
                }
            }
        }
    };
}

field_set! {
    HotelFields {
        hotel_name: "hotelName", "Hotel Name", FieldKind::Text, "";
        booking_number: "bookingNumber", "Booking Number", FieldKind::Text, "";
        check_in_date: "checkInDate", "Check-in Date", FieldKind::Date, "";
        check_out_date: "checkOutDate", "Check-out Date", FieldKind::Date, "";
        number_of_guests: "numberOfGuests", "Number of Guests", FieldKind::Integer, "";
        number_of_rooms: "numberOfRooms", "Number of Rooms", FieldKind::Integer, "";
        room_type: "roomType", "Room Type", FieldKind::Text, "";
    }
}

field_set! {
    FlightFields {
        flight_number: "flightNumber", "Flight Number", FieldKind::Text, "";
        airline: "airline", "Airline", FieldKind::Text, "";
        departure_date: "departureDate", "Departure Date", FieldKind::DateTime, "";
        arrival_date: "arrivalDate", "Arrival Date", FieldKind::DateTime, "";
        from: "from", "From", FieldKind::Text, "";
        to: "to", "To", FieldKind::Text, "";
        passenger_info: "passengerInfo", "Passenger Info", FieldKind::LongText, "";
    }
}

field_set! {
    CruiseFields {
        cruise_name: "cruiseName", "Cruise Name", FieldKind::Text, "";
        cruise_line: "cruiseLine", "Cruise Line", FieldKind::Text, "";
        ship: "ship", "Ship", FieldKind::Text, "";
        cabin: "cabin", "Cabin", FieldKind::Text, "";
        departure_date: "departureDate", "Departure Date", FieldKind::Date, "";
        return_date: "returnDate", "Return Date", FieldKind::Date, "";
        departure_port: "departurePort", "Departure Port", FieldKind::Text, "";
        return_port: "returnPort", "Return Port", FieldKind::Text, "";
    }
}

field_set! {
    VisaFields {
        visa_type: "visaType", "Visa Type", FieldKind::Text, "";
        country: "country", "Country", FieldKind::Text, "";
        application_date: "applicationDate", "Application Date", FieldKind::Date, "";
        duration: "duration", "Duration (days)", FieldKind::Integer, "";
        application_details: "applicationDetails", "Application Details", FieldKind::LongText, "";
    }
}

field_set! {
    AppointmentFields {
        appointment_type: "appointmentType", "Appointment Type", FieldKind::Text, "";
        application_date: "applicationDate", "Appointment Date", FieldKind::DateTime, "";
        location: "location", "Location", FieldKind::Text, "";
    }
}

field_set! {
    InsuranceFields {
        insurance_type: "insuranceType", "Insurance Type", FieldKind::Text, "";
        provider: "provider", "Provider", FieldKind::Text, "";
        start_date: "startDate", "Start Date", FieldKind::Date, "";
        end_date: "endDate", "End Date", FieldKind::Date, "";
        insured_persons: "insuredPersons", "Insured Persons", FieldKind::LongText, "";
    }
}

field_set! {
    TicketFields {
        event_name: "eventName", "Event Name", FieldKind::Text, "";
        event_date: "eventDate", "Event Date", FieldKind::Date, "";
        seat_category: "seatCategory", "Seat Category", FieldKind::Text, "";
        quantity: "quantity", "Quantity", FieldKind::Integer, "";
        ticket_count: "ticketCount", "Ticket Count", FieldKind::Integer, "";
    }
}

field_set! {
    TransportationFields {
        transport_type: "transportType", "Transport Type", FieldKind::Select(TRANSPORT_TYPES), "Car";
        pickup_location: "pickupLocation", "Pickup Location", FieldKind::Text, "";
        dropoff_location: "dropoffLocation", "Dropoff Location", FieldKind::Text, "";
        route_from: "routeFrom", "Route From", FieldKind::Text, "";
        route_to: "routeTo", "Route To", FieldKind::Text, "";
        transportation_date: "transportationDate", "Transportation Date", FieldKind::DateTime, "";
        passenger_count: "passengerCount", "Passenger Count", FieldKind::Integer, "";
    }
}

/// Type-specific details of a booking; the arm is the booking type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "bookingType")]
pub enum TypeFields {
    Hotel(HotelFields),
    Flight(FlightFields),
    Cruise(CruiseFields),
    Visa(VisaFields),
    Appointment(AppointmentFields),
    Insurance(InsuranceFields),
    Ticket(TicketFields),
    Transportation(TransportationFields),
}

impl TypeFields {
    /// Fresh field set for `ty` with registry defaults applied.
    pub fn empty(ty: BookingType) -> Self {
        match ty {
            BookingType::Hotel => TypeFields::Hotel(HotelFields::default()),
            BookingType::Flight => TypeFields::Flight(FlightFields::default()),
            BookingType::Cruise => TypeFields::Cruise(CruiseFields::default()),
            BookingType::Visa => TypeFields::Visa(VisaFields::default()),
            BookingType::Appointment => TypeFields::Appointment(AppointmentFields::default()),
            BookingType::Insurance => TypeFields::Insurance(InsuranceFields::default()),
            BookingType::Ticket => TypeFields::Ticket(TicketFields::default()),
            BookingType::Transportation => {
                TypeFields::Transportation(TransportationFields::default())
            }
        }
    }

    pub fn booking_type(&self) -> BookingType {
        match self {
            TypeFields::Hotel(_) => BookingType::Hotel,
            TypeFields::Flight(_) => BookingType::Flight,
            TypeFields::Cruise(_) => BookingType::Cruise,
            TypeFields::Visa(_) => BookingType::Visa,
            TypeFields::Appointment(_) => BookingType::Appointment,
            TypeFields::Insurance(_) => BookingType::Insurance,
            TypeFields::Ticket(_) => BookingType::Ticket,
            TypeFields::Transportation(_) => BookingType::Transportation,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            TypeFields::Hotel(f) => f.get(key),
            TypeFields::Flight(f) => f.get(key),
            TypeFields::Cruise(f) => f.get(key),
            TypeFields::Visa(f) => f.get(key),
            TypeFields::Appointment(f) => f.get(key),
            TypeFields::Insurance(f) => f.get(key),
            TypeFields::Ticket(f) => f.get(key),
            TypeFields::Transportation(f) => f.get(key),
        }
    }

    /// Writes `value` into `key`. Returns false when this type has no such field.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let value = normalize(self.booking_type(), key, value);
        let slot = match self {
            TypeFields::Hotel(f) => f.slot_mut(key),
            TypeFields::Flight(f) => f.slot_mut(key),
            TypeFields::Cruise(f) => f.slot_mut(key),
            TypeFields::Visa(f) => f.slot_mut(key),
            TypeFields::Appointment(f) => f.slot_mut(key),
            TypeFields::Insurance(f) => f.slot_mut(key),
            TypeFields::Ticket(f) => f.slot_mut(key),
            TypeFields::Transportation(f) => f.slot_mut(key),
        };
        match slot {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Descriptor and current value of every field, in render order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &str)> + '_ {
        self.booking_type()
            .fields()
            .iter()
            .map(move |d| (d, self.get(d.key).unwrap_or_default()))
    }
}

fn normalize(ty: BookingType, key: &str, value: &str) -> String {
    if ty == BookingType::Ticket && key == "eventDate" {
        date_portion(value).to_string()
    } else {
        value.to_string()
    }
}

/// Date part of an ISO-ish date or datetime string.
pub fn date_portion(value: &str) -> &str {
    let value = value.trim();
    match value.find(|c: char| c == 'T' || c == ' ') {
        Some(idx) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_applies_registry_defaults() {
        let fields = TypeFields::empty(BookingType::Transportation);
        assert_eq!(fields.get("transportType"), Some("Car"));
        assert_eq!(fields.get("pickupLocation"), Some(""));
    }

    #[test]
    fn test_set_unknown_key_is_rejected() {
        let mut fields = TypeFields::empty(BookingType::Hotel);
        assert!(!fields.set("flightNumber", "AB12"));
        assert!(fields.set("hotelName", "Grand"));
        assert_eq!(fields.get("hotelName"), Some("Grand"));
    }

    #[test]
    fn test_ticket_event_date_is_truncated() {
        let mut fields = TypeFields::empty(BookingType::Ticket);
        fields.set("eventDate", "2025-08-01T00:00:00");
        assert_eq!(fields.get("eventDate"), Some("2025-08-01"));
    }

    #[test]
    fn test_other_datetimes_are_kept() {
        let mut fields = TypeFields::empty(BookingType::Flight);
        fields.set("departureDate", "2025-08-01T09:30");
        assert_eq!(fields.get("departureDate"), Some("2025-08-01T09:30"));
    }

    #[test]
    fn test_date_portion() {
        assert_eq!(date_portion("2025-08-01T00:00:00"), "2025-08-01");
        assert_eq!(date_portion("2025-08-01 10:00"), "2025-08-01");
        assert_eq!(date_portion("2025-08-01"), "2025-08-01");
        assert_eq!(date_portion(""), "");
    }

    #[test]
    fn test_entries_follow_descriptor_order() {
        let mut fields = TypeFields::empty(BookingType::Appointment);
        fields.set("location", "Embassy");
        let entries: Vec<(&str, &str)> = fields.entries().map(|(d, v)| (d.key, v)).collect();
        assert_eq!(
            entries,
            vec![("appointmentType", ""), ("applicationDate", ""), ("location", "Embassy")]
        );
    }
}
