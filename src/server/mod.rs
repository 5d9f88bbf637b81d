//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{authorize_middleware, path_guard_middleware};
use crate::state::AppState;
use anyhow::Result;
use axum::{middleware, routing::get, Router};
use sqlx::mysql::MySqlPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Build the application router.
///
/// Everything under `/api` passes through the authorization guard; the
/// health and whoami endpoints sit outside the namespace and pass through.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/auth/whoami", get(api::whoami))
        .route("/api/dashboard", get(api::dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authorize_middleware,
        ))
        .layer(middleware::from_fn(path_guard_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
        .with_state(state)
}

/// Connect to the store and serve until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    let addr = config.http_addr();
    let state = AppState::new(config, pool);
    let app = router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("LeadHub Core listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
