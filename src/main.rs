use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use travel_desk::config::AppConfig;
use travel_desk::handlers;
use travel_desk::services::reservations::http::HttpReservationApi;
use travel_desk::services::submission::BookingService;
use travel_desk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(!config.api_base_url.is_empty(), "API_BASE_URL must not be empty");
    tracing::info!("using reservations backend at {}", config.api_base_url);

    let api = HttpReservationApi::new(config.api_base_url.clone());
    let state = Arc::new(AppState {
        config: config.clone(),
        bookings: BookingService::new(Box::new(api)),
    });

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
