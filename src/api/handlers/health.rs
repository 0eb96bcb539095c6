//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Loads the site totals
/// 2. **Telemetry Queue**: Checks if the sink is open and reports capacity
/// 3. **Cache**: Tests Redis PING
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store = check_store(&state).await;
    let telemetry_queue = check_telemetry_queue(&state);
    let cache = check_cache(&state).await;

    let all_healthy = store.is_ok() && telemetry_queue.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store,
            telemetry_queue,
            cache,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.catalog_service.stats().await {
        Ok(stats) => CheckStatus::ok(format!(
            "{} tools in {} categories",
            stats.total_tools, stats.total_categories
        )),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

fn check_telemetry_queue(state: &AppState) -> CheckStatus {
    if !state.telemetry.is_open() {
        return CheckStatus::error("Telemetry queue is closed");
    }

    match state.telemetry.capacity() {
        Some(capacity) => CheckStatus::ok(format!("Capacity: {}", capacity)),
        None => CheckStatus::ok("Unbounded"),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache available")
    } else {
        CheckStatus::error("Redis connection failed")
    }
}
