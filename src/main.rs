//! fanzone-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fanzone_gateway::api;
use fanzone_gateway::app_state::AppState;
use fanzone_gateway::config::GatewayConfig;
use fanzone_gateway::domain::EventBus;
use fanzone_gateway::persistence::PostgresStore;
use fanzone_gateway::service::{
    EntryService, LeaderboardService, LedgerService, ParticipationService,
};
use fanzone_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting fanzone-gateway");

    // Connect to PostgreSQL and run migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    // Build domain + persistence layer
    let store = PostgresStore::new(pool);
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let participation_service = Arc::new(ParticipationService::new(
        store.clone(),
        event_bus.clone(),
        config.top_participants_limit,
    ));
    let entry_service = Arc::new(EntryService::new(store.clone(), event_bus.clone()));
    let ledger_service = Arc::new(LedgerService::new(
        store.clone(),
        event_bus.clone(),
        config.ledger_default_limit,
        config.ledger_max_limit,
    ));
    let leaderboard_service = Arc::new(LeaderboardService::new(store, event_bus.clone()));

    // Build application state
    let app_state = AppState {
        participation_service,
        entry_service,
        ledger_service,
        leaderboard_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
