pub mod booking;
pub mod booking_type;
pub mod financial;
pub mod type_fields;
pub mod wire;

pub use booking::{BookingRecord, Customer, Supplier, DEFAULT_REMINDER_DAYS};
pub use booking_type::{fields_for, BookingStatus, BookingType, PaymentStatus};
pub use financial::{compute_net_profit, AmountInput, Financial};
pub use type_fields::{FieldDescriptor, FieldKind, TypeFields};
pub use wire::{WireDetails, WirePayload};
