use serde_json::{Map, Value};

use crate::models::financial::{parse_amount, wire_amount};
use crate::models::{AmountInput, BookingRecord, FieldKind, WireDetails, WirePayload};

/// Flattens a record into the backend's update body.
///
/// Never fails: non-numeric money becomes 0, non-numeric counts become 0.
/// Required-field checks belong to validation and run before this.
///
/// Amounts are rounded to what a JSON number can carry before net profit is
/// taken from them, so the body reads back as exactly what was sent.
pub fn encode(record: &BookingRecord) -> WirePayload {
    let amount = |input: AmountInput| wire_amount(parse_amount(record.financial.input(input)));
    let details = WireDetails {
        sell_price: amount(AmountInput::SellPrice),
        cost: amount(AmountInput::Cost),
        fees: amount(AmountInput::Fees),
    };
    let net_profit = wire_amount(details.sell_price - details.fees - details.cost);

    let mut type_fields = Map::new();
    if let Some(details) = record.details() {
        for (descriptor, value) in details.entries() {
            let encoded = match descriptor.kind {
                FieldKind::Integer => Value::from(parse_count(value)),
                _ => Value::from(value),
            };
            type_fields.insert(descriptor.key.to_string(), encoded);
        }
    }

    WirePayload {
        name: record.customer.name.clone(),
        phone_number: record.customer.phone.clone(),
        booking_type: record
            .booking_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        status: record.status.as_str().to_string(),
        notes: record.notes.clone(),
        details,
        net_profit,
        supplier_name: record.supplier.name.clone(),
        payment_status: record.supplier.payment_status.as_str().to_string(),
        type_fields,
    }
}

/// Leading-integer parse: `"7"` -> 7, `"7 pax"` -> 7, `""` or `"x"` -> 0.
pub fn parse_count(raw: &str) -> i64 {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}
