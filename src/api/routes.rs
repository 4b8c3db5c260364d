//! API route configuration.

use crate::api::handlers::{
    check_handler, create_config_handler, delete_config_handler, list_configs_handler,
    redirect_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /configs`        - List configurations, newest first
/// - `POST   /configs`        - Create a configuration
/// - `DELETE /configs/{id}`   - Delete a configuration
/// - `GET    /check`          - Resolve a keyword to a JSON redirect decision
/// - `GET    /configs/check`  - Alias of `/check`
/// - `GET    /redirect`       - Resolve a keyword and answer with a 302
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/configs",
            get(list_configs_handler).post(create_config_handler),
        )
        .route("/configs/check", get(check_handler))
        .route("/configs/{id}", delete(delete_config_handler))
        .route("/check", get(check_handler))
        .route("/redirect", get(redirect_handler))
}
