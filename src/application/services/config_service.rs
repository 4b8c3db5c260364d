//! Configuration management and keyword resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{CampaignType, LinkConfig, NewLinkConfig};
use crate::domain::repositories::ConfigRepository;
use crate::error::AppError;
use crate::utils::url_check::check_link;
use crate::utils::utm::generate_utm;

/// Maximum accepted keyword length in characters.
pub const MAX_KEYWORD_LEN: usize = 255;

/// Unvalidated create input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct CreateConfig {
    pub keyword: Option<String>,
    pub white_link: Option<String>,
    pub black_link: Option<String>,
    pub campaign_type: Option<String>,
}

/// A newly stored configuration with its derived artifacts.
#[derive(Debug, Clone)]
pub struct CreatedConfig {
    pub config: LinkConfig,
    pub utm: String,
    /// JSON resolution endpoint for this keyword.
    pub check_url: String,
    /// Server-side redirect endpoint for this keyword.
    pub redirect_url: String,
}

/// Outcome of resolving a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No keyword was supplied; storage was not consulted.
    MissingKeyword,
    NotFound,
    Redirect { url: String },
    /// Storage failed even after fallback.
    Unavailable,
}

impl Resolution {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingKeyword => "No keyword provided",
            Self::NotFound => "Keyword not found",
            Self::Redirect { .. } => "Keyword verified",
            Self::Unavailable => "Server error",
        }
    }

    /// Label used for the resolution outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::MissingKeyword => "missing_keyword",
            Self::NotFound => "not_found",
            Self::Redirect { .. } => "redirect",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Service owning the configuration lifecycle.
///
/// Validates input, enforces keyword uniqueness, and resolves keywords to
/// their destination. Storage backend selection is the repository's concern.
pub struct ConfigService<R: ConfigRepository + ?Sized> {
    repository: Arc<R>,
    public_base_url: String,
}

impl<R: ConfigRepository + ?Sized> ConfigService<R> {
    /// Creates a new config service.
    ///
    /// `public_base_url` is the externally reachable origin used to build
    /// the resolution URLs returned from [`Self::create`].
    pub fn new(repository: Arc<R>, public_base_url: impl Into<String>) -> Self {
        Self {
            repository,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Name of the storage backend currently serving requests.
    pub fn backend_name(&self) -> &'static str {
        self.repository.backend_name()
    }

    /// Validates and stores a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - any of the four fields is missing or empty
    /// - the campaign type is not `facebook` or `google`
    /// - a link is not an absolute HTTP(S) URL
    /// - the keyword is longer than [`MAX_KEYWORD_LEN`]
    ///
    /// Returns [`AppError::Duplicate`] if the keyword already exists.
    /// Returns [`AppError::StoreUnavailable`] if storage fails after fallback.
    pub async fn create(&self, input: CreateConfig) -> Result<CreatedConfig, AppError> {
        let new_config = validate(input).inspect_err(|e| {
            info!(error = %e, "Rejected configuration");
        })?;

        if self
            .repository
            .find_by_keyword(&new_config.keyword)
            .await?
            .is_some()
        {
            info!(keyword = %new_config.keyword, "Keyword already exists");
            return Err(AppError::duplicate(
                "Keyword already exists",
                json!({ "keyword": new_config.keyword }),
            ));
        }

        let config = self.repository.insert(new_config).await?;
        info!(id = %config.id, keyword = %config.keyword, "Configuration created");
        metrics::counter!("configs_created_total", "campaign_type" => config.campaign_type.as_str())
            .increment(1);

        Ok(CreatedConfig {
            utm: generate_utm(config.campaign_type.as_str(), &config.keyword),
            check_url: self.endpoint_url("check", &config.keyword),
            redirect_url: self.endpoint_url("redirect", &config.keyword),
            config,
        })
    }

    /// Returns all configurations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if storage fails after fallback.
    pub async fn list(&self) -> Result<Vec<LinkConfig>, AppError> {
        self.repository.list_all().await
    }

    /// Deletes a configuration by id.
    ///
    /// Deleting an id that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if storage fails after fallback.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.repository.delete_by_id(id).await? {
            info!(id, "Configuration deleted");
        } else {
            debug!(id, "Delete requested for unknown configuration");
        }
        Ok(())
    }

    /// Resolves a keyword to its destination.
    ///
    /// Never fails: storage errors become [`Resolution::Unavailable`] so the
    /// resolution endpoints can always answer.
    pub async fn resolve(&self, keyword: Option<&str>) -> Resolution {
        let resolution = match keyword.filter(|k| !k.is_empty()) {
            None => Resolution::MissingKeyword,
            Some(keyword) => match self.repository.find_by_keyword(keyword).await {
                Ok(Some(config)) => Resolution::Redirect {
                    url: config.black_link,
                },
                Ok(None) => Resolution::NotFound,
                Err(e) => {
                    warn!(error = %e, keyword, "Keyword lookup failed");
                    Resolution::Unavailable
                }
            },
        };

        metrics::counter!("keyword_resolutions_total", "outcome" => resolution.outcome())
            .increment(1);
        resolution
    }

    fn endpoint_url(&self, endpoint: &str, keyword: &str) -> String {
        let mut url = format!("{}/api/{}", self.public_base_url, endpoint);
        url.push_str("?keyword=");
        url.push_str(&url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect::<String>());
        url
    }
}

/// Turns raw input into a [`NewLinkConfig`] or a validation error.
fn validate(input: CreateConfig) -> Result<NewLinkConfig, AppError> {
    fn present(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    let keyword = present(input.keyword);
    let white_link = present(input.white_link);
    let black_link = present(input.black_link);
    let campaign_type = present(input.campaign_type);

    let (Some(keyword), Some(white_link), Some(black_link), Some(campaign_type)) =
        (keyword.clone(), white_link.clone(), black_link.clone(), campaign_type.clone())
    else {
        let missing: Vec<&str> = [
            ("keyword", keyword.is_none()),
            ("whiteLink", white_link.is_none()),
            ("blackLink", black_link.is_none()),
            ("campaignType", campaign_type.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        return Err(AppError::bad_request(
            "Missing required fields",
            json!({ "missing": missing }),
        ));
    };

    let campaign_type: CampaignType = campaign_type.parse().map_err(|_| {
        AppError::bad_request(
            "Invalid campaign type. Must be facebook or google",
            json!({ "campaignType": campaign_type }),
        )
    })?;

    if keyword.chars().count() > MAX_KEYWORD_LEN {
        return Err(AppError::bad_request(
            "Keyword is too long",
            json!({ "max_length": MAX_KEYWORD_LEN }),
        ));
    }

    for (field, link) in [("whiteLink", &white_link), ("blackLink", &black_link)] {
        check_link(link).map_err(|e| {
            AppError::bad_request(
                "Invalid URL",
                json!({ "field": field, "reason": e.to_string() }),
            )
        })?;
    }

    Ok(NewLinkConfig {
        keyword,
        white_link,
        black_link,
        campaign_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockConfigRepository;
    use chrono::Utc;

    const BASE_URL: &str = "https://router.example";

    fn input(keyword: &str, campaign_type: &str) -> CreateConfig {
        CreateConfig {
            keyword: Some(keyword.to_string()),
            white_link: Some("https://safe.example".to_string()),
            black_link: Some("https://real.example".to_string()),
            campaign_type: Some(campaign_type.to_string()),
        }
    }

    fn stored(keyword: &str) -> LinkConfig {
        LinkConfig::new(
            "1".to_string(),
            keyword.to_string(),
            "https://safe.example".to_string(),
            "https://real.example".to_string(),
            CampaignType::Google,
            Utc::now(),
        )
    }

    fn service(repo: MockConfigRepository) -> ConfigService<MockConfigRepository> {
        ConfigService::new(Arc::new(repo), format!("{BASE_URL}/"))
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword()
            .withf(|k| k == "promo1")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|n| n.keyword == "promo1" && n.campaign_type == CampaignType::Google)
            .times(1)
            .returning(|n| Ok(n.into_config("1".to_string(), Utc::now())));

        let created = service(repo).create(input("promo1", "google")).await.unwrap();

        assert_eq!(created.config.keyword, "promo1");
        assert!(created.utm.starts_with("utm_source=GOOGLE&keyword=promo1"));
        assert_eq!(
            created.check_url,
            "https://router.example/api/check?keyword=promo1"
        );
        assert_eq!(
            created.redirect_url,
            "https://router.example/api/redirect?keyword=promo1"
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_keyword() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword()
            .times(1)
            .returning(|k| Ok(Some(stored(k))));
        repo.expect_insert().times(0);

        let result = service(repo).create(input("dup", "facebook")).await;

        assert!(matches!(result, Err(AppError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_create_racing_duplicate_from_insert() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(AppError::duplicate("Keyword already exists", json!({}))));

        let result = service(repo).create(input("dup", "facebook")).await;

        assert!(matches!(result, Err(AppError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_create_invalid_campaign_type() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword().times(0);

        let result = service(repo).create(input("promo1", "yahoo")).await;

        match result {
            Err(AppError::Validation { message, .. }) => {
                assert_eq!(message, "Invalid campaign type. Must be facebook or google")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let repo = MockConfigRepository::new();
        let mut payload = input("promo1", "google");
        payload.white_link = None;
        payload.keyword = Some("   ".to_string());

        let result = service(repo).create(payload).await;

        match result {
            Err(AppError::Validation { message, details }) => {
                assert_eq!(message, "Missing required fields");
                assert_eq!(details["missing"], json!(["keyword", "whiteLink"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_non_http_link() {
        let repo = MockConfigRepository::new();
        let mut payload = input("promo1", "google");
        payload.black_link = Some("javascript:alert(1)".to_string());

        let result = service(repo).create(payload).await;

        match result {
            Err(AppError::Validation { details, .. }) => assert_eq!(details["field"], "blackLink"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_long_keyword() {
        let repo = MockConfigRepository::new();
        let keyword = "k".repeat(MAX_KEYWORD_LEN + 1);

        let result = service(repo).create(input(&keyword, "google")).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_store_unavailable_propagates() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword()
            .returning(|_| Err(AppError::store_unavailable("Database error", json!({}))));

        let result = service(repo).create(input("promo1", "google")).await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let mut repo = MockConfigRepository::new();
        repo.expect_delete_by_id()
            .withf(|id| id == "nope")
            .times(1)
            .returning(|_| Ok(false));

        assert!(service(repo).delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_without_keyword_skips_storage() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword().times(0);
        let service = service(repo);

        assert_eq!(service.resolve(None).await, Resolution::MissingKeyword);
        assert_eq!(service.resolve(Some("")).await, Resolution::MissingKeyword);
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword()
            .returning(|k| Ok(Some(stored(k))));

        let resolution = service(repo).resolve(Some("promo1")).await;

        assert_eq!(
            resolution,
            Resolution::Redirect {
                url: "https://real.example".to_string()
            }
        );
        assert_eq!(resolution.message(), "Keyword verified");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword().returning(|_| Ok(None));

        assert_eq!(
            service(repo).resolve(Some("missing")).await,
            Resolution::NotFound
        );
    }

    #[tokio::test]
    async fn test_resolve_storage_failure_is_unavailable() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find_by_keyword()
            .returning(|_| Err(AppError::store_unavailable("Database error", json!({}))));

        assert_eq!(
            service(repo).resolve(Some("promo1")).await,
            Resolution::Unavailable
        );
    }

    #[test]
    fn test_endpoint_url_encodes_keyword() {
        let service = service(MockConfigRepository::new());
        assert_eq!(
            service.endpoint_url("check", "a b&c"),
            "https://router.example/api/check?keyword=a+b%26c"
        );
    }
}
