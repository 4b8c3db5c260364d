//! DTOs for keyword resolution endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::Resolution;

/// Query string for `GET /api/check` and `GET /api/redirect`.
///
/// Parsed leniently from the raw query: the first `keyword` wins and
/// anything else is ignored, so a malformed query still gets a decision.
#[derive(Debug, Default, PartialEq)]
pub struct ResolveQuery {
    pub keyword: Option<String>,
}

impl ResolveQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let keyword = raw.and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "keyword")
                .map(|(_, value)| value.into_owned())
        });

        Self { keyword }
    }
}

/// Redirect decision returned by `GET /api/check`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResolveResponse {
    pub redirect: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub message: String,
}

impl From<Resolution> for ResolveResponse {
    fn from(resolution: Resolution) -> Self {
        let message = resolution.message().to_string();
        match resolution {
            Resolution::Redirect { url } => Self {
                redirect: true,
                url: Some(url),
                message,
            },
            _ => Self {
                redirect: false,
                url: None,
                message,
            },
        }
    }
}
