//! Per-type field lists for the edit form and the read-only detail view.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::financial::parse_amount;
use crate::models::type_fields::date_portion;
use crate::models::{
    AmountInput, BookingRecord, BookingStatus, BookingType, FieldDescriptor, FieldKind,
};

/// Placeholder every absent value renders as in the detail view.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Date,
    DateTime,
    LongText,
    Select(Vec<String>),
}

impl From<FieldKind> for InputKind {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => InputKind::Text,
            FieldKind::Integer => InputKind::Number,
            FieldKind::Date => InputKind::Date,
            FieldKind::DateTime => InputKind::DateTime,
            FieldKind::LongText => InputKind::LongText,
            FieldKind::Select(options) => {
                InputKind::Select(options.iter().map(|o| o.to_string()).collect())
            }
        }
    }
}

/// Which part of the record an edit to a field lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRoute {
    Record,
    Customer,
    Supplier,
    Financial,
    Details,
    ReadOnly,
}

/// A form key resolved to its place in the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    BookingType,
    CustomerName,
    CustomerPhone,
    SupplierName,
    SupplierPhone,
    PaymentStatus,
    Amount(AmountInput),
    NetProfit,
    Status,
    Notes,
    ReminderDays,
    Detail(String),
}

impl FieldPath {
    /// Anything that isn't a common key is taken as a type-specific field.
    pub fn parse(key: &str) -> Self {
        match key {
            "bookingType" => FieldPath::BookingType,
            "customer.name" => FieldPath::CustomerName,
            "customer.phone" => FieldPath::CustomerPhone,
            "supplier.name" => FieldPath::SupplierName,
            "supplier.phone" => FieldPath::SupplierPhone,
            "supplier.paymentStatus" => FieldPath::PaymentStatus,
            "netProfit" => FieldPath::NetProfit,
            "status" => FieldPath::Status,
            "notes" => FieldPath::Notes,
            "reminderDays" => FieldPath::ReminderDays,
            other => match AmountInput::from_key(other) {
                Some(input) => FieldPath::Amount(input),
                None => FieldPath::Detail(other.to_string()),
            },
        }
    }

    pub fn route(&self) -> UpdateRoute {
        match self {
            FieldPath::BookingType | FieldPath::Status | FieldPath::Notes => UpdateRoute::Record,
            FieldPath::CustomerName | FieldPath::CustomerPhone => UpdateRoute::Customer,
            FieldPath::SupplierName | FieldPath::PaymentStatus => UpdateRoute::Supplier,
            FieldPath::Amount(_) => UpdateRoute::Financial,
            // Derived, or not carried by the update body.
            FieldPath::NetProfit | FieldPath::SupplierPhone | FieldPath::ReminderDays => {
                UpdateRoute::ReadOnly
            }
            FieldPath::Detail(_) => UpdateRoute::Details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditField {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub input: InputKind,
    pub value: String,
    pub route: UpdateRoute,
}

impl EditField {
    fn new(key: &str, label: &str, input: InputKind, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            input,
            value: value.into(),
            route: FieldPath::parse(key).route(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewField {
    pub key: String,
    pub label: String,
    pub formatted_value: String,
}

impl ViewField {
    fn new(key: &str, label: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            formatted_value: or_na(value),
        }
    }
}

pub fn project_for_edit(record: &BookingRecord) -> Vec<EditField> {
    let booking_type = record.booking_type();
    let payment_options = match booking_type {
        Some(ty) => ty.payment_statuses(),
        None => &[],
    };

    let mut fields = vec![
        EditField::new(
            "bookingType",
            "Booking Type",
            InputKind::Select(BookingType::ALL.iter().map(|t| t.to_string()).collect()),
            booking_type.map(|t| t.as_str()).unwrap_or_default(),
        ),
        EditField::new("customer.name", "Customer Name", InputKind::Text, &record.customer.name),
        EditField::new("customer.phone", "Customer Phone", InputKind::Text, &record.customer.phone),
        EditField::new("supplier.name", "Supplier Name", InputKind::Text, &record.supplier.name),
        EditField::new("supplier.phone", "Supplier Phone", InputKind::Text, &record.supplier.phone),
        EditField::new(
            "supplier.paymentStatus",
            "Payment Status",
            InputKind::Select(payment_options.iter().map(|p| p.as_str().to_string()).collect()),
            record.supplier.payment_status.as_str(),
        ),
        EditField::new("sellPrice", "Sell Price", InputKind::Number, record.financial.sell_price()),
        EditField::new("fees", "Fees", InputKind::Number, record.financial.fees()),
        EditField::new("cost", "Cost", InputKind::Number, record.financial.cost()),
        EditField::new(
            "netProfit",
            "Net Profit",
            InputKind::Number,
            record.financial.net_profit().to_string(),
        ),
        EditField::new(
            "status",
            "Status",
            InputKind::Select(BookingStatus::ALL.iter().map(|s| s.as_str().to_string()).collect()),
            record.status.as_str(),
        ),
        EditField::new("notes", "Notes", InputKind::LongText, &record.notes),
        EditField::new(
            "reminderDays",
            "Reminder Days",
            InputKind::Number,
            record.reminder_days.to_string(),
        ),
    ];

    if let Some(details) = record.details() {
        for (descriptor, value) in details.entries() {
            fields.push(EditField::new(
                descriptor.key,
                descriptor.label,
                descriptor.kind.into(),
                edit_value(record, descriptor, value),
            ));
        }
    }

    fields
}

/// The Flight form shows `departureDate` from the raw `reservable` object while
/// edits are written to the reconciled field. Kept as-is until product decides
/// which of the two is authoritative.
fn edit_value(record: &BookingRecord, descriptor: &FieldDescriptor, value: &str) -> String {
    if record.booking_type() == Some(BookingType::Flight) && descriptor.key == "departureDate" {
        return reservable_text(&record.reservable, &["departureDate", "departure_date"]);
    }
    value.to_string()
}

fn reservable_text(reservable: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| match reservable.get(*k) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn project_for_view(record: &BookingRecord) -> Vec<ViewField> {
    let financial = &record.financial;

    let mut fields = vec![
        ViewField::new(
            "bookingType",
            "Booking Type",
            record.booking_type().map(|t| t.as_str()).unwrap_or_default(),
        ),
        ViewField::new("customer.name", "Customer Name", &record.customer.name),
        ViewField::new("customer.phone", "Customer Phone", &record.customer.phone),
        ViewField::new("supplier.name", "Supplier Name", &record.supplier.name),
        ViewField::new("supplier.phone", "Supplier Phone", &record.supplier.phone),
        ViewField::new(
            "supplier.paymentStatus",
            "Payment Status",
            record.supplier.payment_status.as_str(),
        ),
        ViewField::new("sellPrice", "Sell Price", &format_amount(financial.sell_price())),
        ViewField::new("fees", "Fees", &format_amount(financial.fees())),
        ViewField::new("cost", "Cost", &format_amount(financial.cost())),
        ViewField::new("netProfit", "Net Profit", &format_money(financial.net_profit())),
        ViewField::new("status", "Status", record.status.as_str()),
        ViewField::new("notes", "Notes", &record.notes),
        ViewField::new("reminderDays", "Reminder Days", &record.reminder_days.to_string()),
    ];

    if let Some(details) = record.details() {
        for (descriptor, value) in details.entries() {
            let value = match descriptor.key {
                "eventDate" => date_portion(value),
                _ => value,
            };
            fields.push(ViewField::new(descriptor.key, descriptor.label, value));
        }
    }

    fields
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

/// Blank stays blank (and renders N/A); anything else shows as money.
fn format_amount(raw: &str) -> String {
    if raw.trim().is_empty() {
        String::new()
    } else {
        format_money(parse_amount(raw))
    }
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
