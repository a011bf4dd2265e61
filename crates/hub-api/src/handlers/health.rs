//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use hub_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check against the storage backend
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let storage_healthy = match state.pool() {
        Some(pool) => postgres_reachable(pool).await,
        None => true,
    };

    let response = ReadinessResponse::ready(state.backend().as_str(), storage_healthy);
    let status = if storage_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

async fn postgres_reachable(pool: &hub_db::PgPool) -> bool {
    match pool.acquire().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check could not reach PostgreSQL");
            false
        }
    }
}
