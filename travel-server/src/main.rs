use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_server::config::AppConfig;
use travel_server::navitia::NavitiaClient;
use travel_server::order::OrderResolver;
use travel_server::stations::{StationCatalog, StationMatcher};
use travel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,travel_server=debug".into()),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    if !config.navitia.has_api_key() {
        tracing::warn!("NAVITIA_API_KEY not set. Journey searches will fail.");
    }

    // The catalog is loaded once and shared read-only (fail fast if unavailable)
    let catalog = Arc::new(
        StationCatalog::load(&config.stations_csv).expect("Failed to load station catalog"),
    );

    let matcher = StationMatcher::new(catalog.clone()).with_min_score(config.match_threshold);
    let resolver = OrderResolver::new(matcher);
    let navitia = NavitiaClient::new(config.navitia.clone(), catalog.clone())
        .expect("Failed to create journey planner client");

    let app = create_router(AppState::new(catalog, resolver, navitia));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!(addr = %config.bind_addr, "travel order server listening");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/v1/stations");
    tracing::info!("  POST /api/v1/travel-orders/resolve");
    tracing::info!("  GET  /api/v1/journeys");

    axum::serve(listener, app).await.expect("Server error");
}
