//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Liveness and active storage backend
//! - `/api/*`      - Configuration management and keyword resolution
//!
//! # Middleware
//!
//! - **CORS** - Configured origin list for the dashboard
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origins` - origins allowed to call the API from a browser
pub fn app_router(state: AppState, cors_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, cors_origins))
}

/// Routes and middleware without path normalization.
///
/// Path normalization has to wrap the whole router, so it cannot be a
/// `Router` layer; tests drive this router directly.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(cors::layer(cors_origins))
        .layer(tracing::layer())
}
