use crate::config::AppConfig;
use crate::services::submission::BookingService;

pub struct AppState {
    pub config: AppConfig,
    pub bookings: BookingService,
}
