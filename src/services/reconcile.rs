//! Builds a [`BookingRecord`] out of whatever shape the backend returned.
//!
//! Server payloads mix three conventions for the same data: canonical
//! camelCase keys, snake_case keys, and type-specific fields nested under a
//! polymorphic `reservable` object. Each field is resolved by an explicit
//! candidate list, first non-empty hit wins:
//!
//! 1. top-level camelCase, snake_case, then all-lowercase legacy spelling
//! 2. the same three spellings under `reservable`
//! 3. the registry default
//!
//! so a flat field always beats its nested twin.

use serde_json::{Map, Value};

use crate::models::{
    BookingRecord, BookingStatus, BookingType, Customer, Financial, PaymentStatus, Supplier,
    DEFAULT_REMINDER_DAYS,
};

pub fn reconcile(payload: &Value) -> BookingRecord {
    let empty = Map::new();
    let top = payload.as_object().unwrap_or(&empty);
    let reservable = top
        .get("reservable")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let id = top.get("id").and_then(scalar_text);

    let booking_type = resolve_booking_type(top);
    let mut record = match booking_type {
        Some(ty) => BookingRecord::new(ty),
        None => BookingRecord::untyped(),
    };
    record.id = id;
    record.customer = resolve_customer(top);
    record.supplier = resolve_supplier(top);
    record.financial = resolve_financial(top);
    record.status = first_flat(top, &["status"])
        .and_then(|s| BookingStatus::parse(&s))
        .unwrap_or_default();
    record.notes = first_flat(top, &["notes"]).unwrap_or_default();
    record.reminder_days = first_flat(top, &["reminderDays", "reminder_days"])
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_REMINDER_DAYS);

    if let Some(ty) = booking_type {
        for descriptor in ty.fields() {
            if let Some(value) = resolve_type_field(top, reservable, descriptor.key) {
                record.set_type_field(descriptor.key, &value);
            }
        }
    }

    record.reservable = reservable.clone();
    record
}

/// `bookingType`, then `type`, then the trailing segment of `reservable_type`
/// (`App\Models\Hotel` -> `Hotel`), then Hotel. A present but unrecognized tag
/// yields `None`.
pub fn resolve_booking_type(top: &Map<String, Value>) -> Option<BookingType> {
    let tag = first_flat(top, &["bookingType", "booking_type", "type"]).or_else(|| {
        first_flat(top, &["reservable_type", "reservableType"]).map(|raw| {
            raw.rsplit(|c: char| c == '\\' || c == '/')
                .next()
                .unwrap_or_default()
                .to_string()
        })
    });

    match tag {
        Some(tag) => {
            let parsed = BookingType::parse(&tag);
            if parsed.is_none() {
                tracing::warn!(tag = %tag, "unrecognized booking type");
            }
            parsed
        }
        None => Some(BookingType::Hotel),
    }
}

fn resolve_customer(top: &Map<String, Value>) -> Customer {
    Customer {
        name: nested(top, "customer", &["name"])
            .or_else(|| first_flat(top, &["name", "customerName", "customer_name"]))
            .unwrap_or_default(),
        phone: nested(top, "customer", &["phone"])
            .or_else(|| first_flat(top, &["phoneNumber", "phone_number", "phone"]))
            .unwrap_or_default(),
    }
}

/// Nested `supplier` object first; stray flat fields are legacy fallbacks.
fn resolve_supplier(top: &Map<String, Value>) -> Supplier {
    Supplier {
        name: nested(top, "supplier", &["name"])
            .or_else(|| first_flat(top, &["supplierName", "supplier_name"]))
            .unwrap_or_default(),
        phone: nested(top, "supplier", &["phone"])
            .or_else(|| first_flat(top, &["supplierPhone", "supplier_phone"]))
            .unwrap_or_default(),
        payment_status: nested(top, "supplier", &["paymentStatus", "payment_status"])
            .or_else(|| first_flat(top, &["paymentStatus", "payment_status"]))
            .and_then(|s| PaymentStatus::parse(&s))
            .unwrap_or_default(),
    }
}

fn resolve_financial(top: &Map<String, Value>) -> Financial {
    let amount = |camel: &str, snake: &str| {
        first_flat(top, &[camel, snake])
            .or_else(|| nested(top, "details", &[snake, camel]))
            .unwrap_or_default()
    };
    // net_profit in the payload is ignored; it is always derived.
    Financial::new(
        amount("sellPrice", "sell_price"),
        amount("fees", "fees"),
        amount("cost", "cost"),
    )
}

fn resolve_type_field(
    top: &Map<String, Value>,
    reservable: &Map<String, Value>,
    key: &str,
) -> Option<String> {
    let spellings = spellings(key);
    let spellings: Vec<&str> = spellings.iter().map(String::as_str).collect();

    let flat = first_flat(top, &spellings);
    let nested = first_flat(reservable, &spellings);

    if let (Some(flat), Some(nested)) = (&flat, &nested) {
        if flat != nested {
            tracing::debug!(field = key, flat = %flat, reservable = %nested, "flat field overrides reservable");
        }
    }

    flat.or(nested)
}

/// camelCase, snake_case and lowercase spellings of a canonical key.
fn spellings(key: &str) -> Vec<String> {
    let mut out = vec![key.to_string()];
    for candidate in [to_snake_case(key), key.to_lowercase()] {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn first_flat(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| map.get(*k).and_then(scalar_text))
}

fn nested(top: &Map<String, Value>, object: &str, keys: &[&str]) -> Option<String> {
    top.get(object)
        .and_then(Value::as_object)
        .and_then(|inner| first_flat(inner, keys))
}

/// Text of a scalar JSON value. Null, blank strings and containers count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
