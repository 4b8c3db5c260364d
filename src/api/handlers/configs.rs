//! Handlers for configuration management endpoints (create, list, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::config::{
    ConfigResponse, CreateConfigRequest, CreateConfigResponse, DeleteConfigResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a keyword configuration.
///
/// # Endpoint
///
/// `POST /api/configs`
///
/// # Request Body
///
/// ```json
/// {
///   "keyword": "promo1",
///   "whiteLink": "https://safe.example",
///   "blackLink": "https://real.example",
///   "campaignType": "google"
/// }
/// ```
///
/// # Response
///
/// The stored configuration, the UTM string for the campaign platform, and
/// the URLs of both resolution endpoints for this keyword.
///
/// # Errors
///
/// Returns 400 Bad Request for missing/invalid fields, a body that is not
/// JSON of the expected shape, or a duplicate keyword.
/// Returns 503 Service Unavailable if storage fails even after fallback.
pub async fn create_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateConfigRequest>, JsonRejection>,
) -> Result<Json<CreateConfigResponse>, AppError> {
    let Json(payload) = payload?;
    debug!(keyword = ?payload.keyword, "Create configuration request");
    payload.validate()?;

    let created = state.config_service.create(payload.into()).await?;

    Ok(Json(created.into()))
}

/// Lists all configurations, newest first.
///
/// # Endpoint
///
/// `GET /api/configs`
pub async fn list_configs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConfigResponse>>, AppError> {
    let configs = state.config_service.list().await?;

    Ok(Json(configs.into_iter().map(ConfigResponse::from).collect()))
}

/// Deletes a configuration by id.
///
/// # Endpoint
///
/// `DELETE /api/configs/{id}`
///
/// Unknown ids are not an error; the response is `{"success": true}` either way.
pub async fn delete_config_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteConfigResponse>, AppError> {
    state.config_service.delete(&id).await?;

    Ok(Json(DeleteConfigResponse { success: true }))
}
