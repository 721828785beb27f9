use axum::extract::State;
use axum::{routing::get, Json, Router};
use realtrust_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Root liveness payload.
#[derive(Serialize)]
pub struct RootResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: Timestamp,
}

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the record store is reachable.
    pub db_healthy: bool,
}

/// GET / -- static liveness payload.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        success: true,
        message: "Real Trust API is running",
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/health -- liveness plus record store reachability.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.store.health_check().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Record store health check failed");
            false
        }
    };

    Json(HealthResponse {
        success: true,
        message: "Server is healthy",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount health routes at the root level (not nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
}
