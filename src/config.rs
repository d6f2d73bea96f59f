use std::env;

use crate::models::DEFAULT_REMINDER_DAYS;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub default_reminder_days: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            default_reminder_days: env::var("DEFAULT_REMINDER_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REMINDER_DAYS),
        }
    }
}
