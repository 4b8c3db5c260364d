//! Handlers for keyword resolution.
//!
//! Both endpoints run the same lookup and differ only in how the decision is
//! delivered. Neither ever answers with a 5xx.

use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::dto::resolve::{ResolveQuery, ResolveResponse};
use crate::application::services::Resolution;
use crate::state::AppState;

/// Returns the redirect decision for a keyword as JSON.
///
/// # Endpoint
///
/// `GET /api/check?keyword=<keyword>` (also `GET /api/configs/check`)
///
/// # Response
///
/// Always `200 OK`:
///
/// ```json
/// { "redirect": true, "url": "https://real.example", "message": "Keyword verified" }
/// ```
///
/// or `{"redirect": false, "message": ...}` when the keyword is missing,
/// unknown, or storage failed. Repeated `keyword` parameters resolve the
/// first one.
pub async fn check_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<ResolveResponse> {
    let query = ResolveQuery::parse(raw.as_deref());
    let resolution = state
        .config_service
        .resolve(query.keyword.as_deref())
        .await;

    Json(resolution.into())
}

/// Redirects straight to the keyword's destination.
///
/// # Endpoint
///
/// `GET /api/redirect?keyword=<keyword>`
///
/// # Response Codes
///
/// - **302 Found**: `Location` is the configured `blackLink`
/// - **400 Bad Request**: no keyword given
/// - **404 Not Found**: keyword unknown, or storage unavailable
pub async fn redirect_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = ResolveQuery::parse(raw.as_deref());
    let resolution = state
        .config_service
        .resolve(query.keyword.as_deref())
        .await;

    let status = match &resolution {
        Resolution::Redirect { url } => {
            return (StatusCode::FOUND, Redirect::to(url)).into_response();
        }
        Resolution::MissingKeyword => StatusCode::BAD_REQUEST,
        Resolution::NotFound | Resolution::Unavailable => StatusCode::NOT_FOUND,
    };

    (status, Json(ResolveResponse::from(resolution))).into_response()
}
