//! PostgreSQL implementation of the configuration repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{CampaignType, LinkConfig, NewLinkConfig};
use crate::domain::repositories::ConfigRepository;
use crate::error::AppError;

/// Row shape of the `link_configs` table with `id` rendered as text.
#[derive(Debug, sqlx::FromRow)]
struct ConfigRow {
    id: String,
    keyword: String,
    white_link: String,
    black_link: String,
    campaign_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ConfigRow> for LinkConfig {
    type Error = AppError;

    fn try_from(row: ConfigRow) -> Result<Self, Self::Error> {
        let campaign_type: CampaignType = row.campaign_type.parse().map_err(|e| {
            AppError::internal(
                "Stored configuration has an unknown campaign type",
                json!({ "id": row.id, "reason": format!("{e}") }),
            )
        })?;

        Ok(LinkConfig::new(
            row.id,
            row.keyword,
            row.white_link,
            row.black_link,
            campaign_type,
            row.created_at,
        ))
    }
}

/// PostgreSQL repository for link configurations.
///
/// Every query is bounded by `timeout`; an elapsed timeout is reported as
/// [`AppError::StoreUnavailable`] like any other transport failure.
pub struct PgConfigRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgConfigRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Runs a query future under the configured timeout.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::store_unavailable(
                "Database query timed out",
                json!({ "operation": operation, "timeout_ms": self.timeout.as_millis() as u64 }),
            )),
        }
    }
}

#[async_trait]
impl ConfigRepository for PgConfigRepository {
    async fn insert(&self, new_config: NewLinkConfig) -> Result<LinkConfig, AppError> {
        let row = self
            .bounded(
                "insert",
                sqlx::query_as::<_, ConfigRow>(
                    r#"
                    INSERT INTO link_configs (keyword, white_link, black_link, campaign_type)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id::text AS id, keyword, white_link, black_link, campaign_type, created_at
                    "#,
                )
                .bind(&new_config.keyword)
                .bind(&new_config.white_link)
                .bind(&new_config.black_link)
                .bind(new_config.campaign_type.as_str())
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        row.try_into()
    }

    async fn list_all(&self) -> Result<Vec<LinkConfig>, AppError> {
        let rows = self
            .bounded(
                "list_all",
                sqlx::query_as::<_, ConfigRow>(
                    r#"
                    SELECT id::text AS id, keyword, white_link, black_link, campaign_type, created_at
                    FROM link_configs
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .fetch_all(self.pool.as_ref()),
            )
            .await?;

        rows.into_iter().map(LinkConfig::try_from).collect()
    }

    async fn find_by_keyword(&self, keyword: &str) -> Result<Option<LinkConfig>, AppError> {
        let row = self
            .bounded(
                "find_by_keyword",
                sqlx::query_as::<_, ConfigRow>(
                    r#"
                    SELECT id::text AS id, keyword, white_link, black_link, campaign_type, created_at
                    FROM link_configs
                    WHERE keyword = $1
                    "#,
                )
                .bind(keyword)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        row.map(LinkConfig::try_from).transpose()
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        // Ids are BIGSERIAL here; anything non-numeric cannot match a row.
        let Ok(id) = id.parse::<i64>() else {
            return Ok(false);
        };

        let result = self
            .bounded(
                "delete_by_id",
                sqlx::query("DELETE FROM link_configs WHERE id = $1")
                    .bind(id)
                    .execute(self.pool.as_ref()),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
