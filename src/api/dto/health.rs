//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub storage: StorageStatus,
}

/// Which backend is serving configuration requests.
#[derive(Debug, Serialize)]
pub struct StorageStatus {
    pub backend: String,

    /// False when data lives only in process memory and is lost on restart.
    pub persistent: bool,
}
