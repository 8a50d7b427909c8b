//! Health check endpoint

use axum::Json;
use axum::extract::State;

use crate::models::{ComponentStatus, HealthResponse, HealthStatus};
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_status = match state.store.health().await {
        Ok(()) => ComponentStatus::Ok,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            ComponentStatus::Unavailable
        }
    };

    let status = match store_status {
        ComponentStatus::Ok => HealthStatus::Healthy,
        ComponentStatus::Unavailable => HealthStatus::Degraded,
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_status,
    })
}
