use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Money block of the update body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDetails {
    #[serde(with = "json_number")]
    pub sell_price: Decimal,
    #[serde(with = "json_number")]
    pub cost: Decimal,
    #[serde(with = "json_number")]
    pub fees: Decimal,
}

/// Flat body accepted by `PUT /reservations/:id` and `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePayload {
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "type")]
    pub booking_type: String,
    pub status: String,
    pub notes: String,
    pub details: WireDetails,
    #[serde(with = "json_number")]
    pub net_profit: Decimal,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
    pub payment_status: String,
    /// Active type's fields under their camelCase keys.
    #[serde(flatten)]
    pub type_fields: Map<String, Value>,
}

impl WirePayload {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Decimal as a JSON number, rounded to the nearest f64.
mod json_number {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serialize, Serializer};

    use crate::models::financial::amount_to_f64;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        amount_to_f64(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}
