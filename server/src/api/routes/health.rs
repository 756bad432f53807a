//! Health check endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::DatabaseService;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Shared state for health endpoints
#[derive(Clone)]
pub struct HealthApiState {
    pub database: Arc<DatabaseService>,
}

/// Build health routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = HealthApiState { database };

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/check-db-connection", get(check_db_connection))
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Database connectivity check used by the frontend status line
#[utoipa::path(
    get,
    path = "/check-db-connection",
    tag = "health",
    responses(
        (status = 200, description = "`connected` or `unable to connect`", body = String, content_type = "text/plain")
    )
)]
pub async fn check_db_connection(State(state): State<HealthApiState>) -> &'static str {
    match state.database.executor().ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unable to connect"
        }
    }
}
