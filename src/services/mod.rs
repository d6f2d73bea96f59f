pub mod encoder;
pub mod form;
pub mod projection;
pub mod reconcile;
pub mod reservations;
pub mod submission;
pub mod validation;
