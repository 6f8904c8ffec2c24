//! GET /health

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use std::collections::BTreeMap;

use crate::domain::response::HealthResponse;
use crate::server::app::AppState;

/// Health check endpoint
///
/// Reports per-engine readiness. Returns 200 OK when both the detector and
/// redactor are ready, 503 Service Unavailable otherwise; load balancers key
/// off the status code, humans read the body.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let dependencies: BTreeMap<String, String> = state
        .engines
        .dependency_status()
        .into_iter()
        .map(|(name, status)| (name.to_string(), status.to_string()))
        .collect();

    let is_healthy = state.engines.is_ready();
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dependencies,
        }),
    )
}
