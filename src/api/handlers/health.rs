//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::{HealthResponse, StorageStatus};
use crate::state::AppState;

/// Returns service liveness and the active storage backend.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always `200 OK`: the service keeps answering on the in-memory store
/// when PostgreSQL is gone, so `storage.persistent` is the field to alert on.
///
/// ```json
/// {
///   "status": "OK",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "version": "0.1.0",
///   "storage": { "backend": "postgres", "persistent": true }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = state.config_service.backend_name();

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: StorageStatus {
            backend: backend.to_string(),
            persistent: backend != "memory",
        },
    })
}
