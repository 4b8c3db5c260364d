//! DTOs for configuration endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{CreateConfig, CreatedConfig};
use crate::domain::entities::LinkConfig;

/// Request body for `POST /api/configs`.
///
/// Fields are optional at the serde level so that a missing field is
/// reported as a validation error listing every absent field, instead of a
/// deserialization rejection naming only the first.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigRequest {
    pub keyword: Option<String>,

    #[validate(length(max = 2048, message = "URL is too long"))]
    pub white_link: Option<String>,

    #[validate(length(max = 2048, message = "URL is too long"))]
    pub black_link: Option<String>,

    pub campaign_type: Option<String>,
}

impl From<CreateConfigRequest> for CreateConfig {
    fn from(req: CreateConfigRequest) -> Self {
        Self {
            keyword: req.keyword,
            white_link: req.white_link,
            black_link: req.black_link,
            campaign_type: req.campaign_type,
        }
    }
}

/// External shape of a stored configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub id: String,
    pub keyword: String,
    pub white_link: String,
    pub black_link: String,
    pub campaign_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<LinkConfig> for ConfigResponse {
    fn from(config: LinkConfig) -> Self {
        Self {
            id: config.id,
            keyword: config.keyword,
            white_link: config.white_link,
            black_link: config.black_link,
            campaign_type: config.campaign_type.as_str().to_string(),
            created_at: config.created_at,
        }
    }
}

/// Response for `POST /api/configs`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigResponse {
    pub config: ConfigResponse,
    pub utm: String,
    pub check_url: String,
    pub redirect_url: String,
}

impl From<CreatedConfig> for CreateConfigResponse {
    fn from(created: CreatedConfig) -> Self {
        Self {
            config: created.config.into(),
            utm: created.utm,
            check_url: created.check_url,
            redirect_url: created.redirect_url,
        }
    }
}

/// Response for `DELETE /api/configs/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteConfigResponse {
    pub success: bool,
}
