//! Storage adapter that degrades from PostgreSQL to memory.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use super::MemoryConfigRepository;
use crate::domain::entities::{LinkConfig, NewLinkConfig};
use crate::domain::repositories::ConfigRepository;
use crate::error::AppError;

/// Routes calls to a primary store until it reports
/// [`AppError::StoreUnavailable`], then to the in-memory store for the rest
/// of the process lifetime.
///
/// The switch is one way and is not retried. Records written before and
/// after the switch live in different backends and are not reconciled.
/// Errors other than `StoreUnavailable` (e.g. a duplicate keyword) are
/// returned as-is and do not trigger the switch.
pub struct FallbackConfigRepository {
    primary: Option<Arc<dyn ConfigRepository>>,
    memory: Arc<MemoryConfigRepository>,
    degraded: AtomicBool,
}

impl FallbackConfigRepository {
    /// Creates an adapter that starts on `primary`.
    pub fn new(primary: Arc<dyn ConfigRepository>) -> Self {
        Self {
            primary: Some(primary),
            memory: Arc::new(MemoryConfigRepository::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// Creates an adapter with no primary store; all calls use memory.
    pub fn memory_only() -> Self {
        Self {
            primary: None,
            memory: Arc::new(MemoryConfigRepository::new()),
            degraded: AtomicBool::new(true),
        }
    }

    /// Returns true once calls are being served from memory.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    /// Primary store, or `None` if calls should go to memory.
    fn active_primary(&self) -> Option<&Arc<dyn ConfigRepository>> {
        if self.is_degraded() {
            None
        } else {
            self.primary.as_ref()
        }
    }

    /// Decides whether a primary result should be replaced by a memory call.
    ///
    /// Flips the degraded flag on the first `StoreUnavailable`; the warning
    /// and counter fire only for the call that performed the flip.
    fn should_fall_back<T>(&self, operation: &'static str, result: &Result<T, AppError>) -> bool {
        let Err(err) = result else {
            return false;
        };
        if !err.is_store_unavailable() {
            return false;
        }

        if !self.degraded.swap(true, Ordering::SeqCst) {
            warn!(
                operation,
                error = %err,
                "Primary store failed, falling back to in-memory storage until restart"
            );
            metrics::counter!("store_fallback_total", "operation" => operation).increment(1);
        }

        true
    }
}

#[async_trait]
impl ConfigRepository for FallbackConfigRepository {
    async fn insert(&self, new_config: NewLinkConfig) -> Result<LinkConfig, AppError> {
        if let Some(primary) = self.active_primary() {
            let result = primary.insert(new_config.clone()).await;
            if !self.should_fall_back("insert", &result) {
                return result;
            }
        }

        self.memory.insert(new_config).await
    }

    async fn list_all(&self) -> Result<Vec<LinkConfig>, AppError> {
        if let Some(primary) = self.active_primary() {
            let result = primary.list_all().await;
            if !self.should_fall_back("list_all", &result) {
                return result;
            }
        }

        self.memory.list_all().await
    }

    async fn find_by_keyword(&self, keyword: &str) -> Result<Option<LinkConfig>, AppError> {
        if let Some(primary) = self.active_primary() {
            let result = primary.find_by_keyword(keyword).await;
            if !self.should_fall_back("find_by_keyword", &result) {
                return result;
            }
        }

        self.memory.find_by_keyword(keyword).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        if let Some(primary) = self.active_primary() {
            let result = primary.delete_by_id(id).await;
            if !self.should_fall_back("delete_by_id", &result) {
                return result;
            }
        }

        self.memory.delete_by_id(id).await
    }

    fn backend_name(&self) -> &'static str {
        match self.active_primary() {
            Some(primary) => primary.backend_name(),
            None => self.memory.backend_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CampaignType;
    use crate::domain::repositories::MockConfigRepository;
    use chrono::Utc;
    use serde_json::json;

    fn new_config(keyword: &str) -> NewLinkConfig {
        NewLinkConfig {
            keyword: keyword.to_string(),
            white_link: "https://safe.example".to_string(),
            black_link: "https://real.example".to_string(),
            campaign_type: CampaignType::Google,
        }
    }

    fn unavailable() -> AppError {
        AppError::store_unavailable("Database error", json!({}))
    }

    #[tokio::test]
    async fn test_uses_primary_while_healthy() {
        let mut primary = MockConfigRepository::new();
        primary
            .expect_insert()
            .times(1)
            .returning(|n| Ok(n.into_config("1".to_string(), Utc::now())));
        primary.expect_backend_name().return_const("postgres");

        let repo = FallbackConfigRepository::new(Arc::new(primary));
        let created = repo.insert(new_config("promo1")).await.unwrap();

        assert_eq!(created.id, "1");
        assert!(!repo.is_degraded());
        assert_eq!(repo.backend_name(), "postgres");
    }

    #[tokio::test]
    async fn test_falls_back_on_store_unavailable() {
        let mut primary = MockConfigRepository::new();
        primary
            .expect_insert()
            .times(1)
            .returning(|_| Err(unavailable()));

        let repo = FallbackConfigRepository::new(Arc::new(primary));
        let created = repo.insert(new_config("promo1")).await.unwrap();

        assert!(repo.is_degraded());
        assert_eq!(created.keyword, "promo1");
        assert_eq!(repo.backend_name(), "memory");

        // Served from memory now; the primary mock would panic on a second call.
        let found = repo.find_by_keyword("promo1").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_degradation_is_permanent() {
        let mut primary = MockConfigRepository::new();
        primary
            .expect_list_all()
            .times(1)
            .returning(|| Err(unavailable()));
        primary.expect_find_by_keyword().times(0);
        primary.expect_delete_by_id().times(0);

        let repo = FallbackConfigRepository::new(Arc::new(primary));

        assert!(repo.list_all().await.unwrap().is_empty());
        assert!(repo.find_by_keyword("any").await.unwrap().is_none());
        assert!(!repo.delete_by_id("missing").await.unwrap());
        assert!(repo.is_degraded());
    }

    #[tokio::test]
    async fn test_duplicate_does_not_trigger_fallback() {
        let mut primary = MockConfigRepository::new();
        primary
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::duplicate("Keyword already exists", json!({}))));

        let repo = FallbackConfigRepository::new(Arc::new(primary));
        let result = repo.insert(new_config("dup")).await;

        assert!(matches!(result, Err(AppError::Duplicate { .. })));
        assert!(!repo.is_degraded());
    }

    #[tokio::test]
    async fn test_memory_only_starts_degraded() {
        let repo = FallbackConfigRepository::memory_only();

        assert!(repo.is_degraded());
        assert_eq!(repo.backend_name(), "memory");

        repo.insert(new_config("dup")).await.unwrap();
        let result = repo.insert(new_config("dup")).await;
        assert!(matches!(result, Err(AppError::Duplicate { .. })));
    }
}
