pub mod bookings;
pub mod health;
pub mod registry;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/booking-types", get(registry::get_booking_types))
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/api/bookings/new", get(bookings::new_booking_form))
        .route(
            "/api/bookings/:id",
            get(bookings::get_booking).put(bookings::update_booking),
        )
        .route("/api/bookings/:id/form", get(bookings::get_booking_form))
        .with_state(state)
}
