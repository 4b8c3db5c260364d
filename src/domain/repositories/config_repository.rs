//! Repository trait for link configuration storage.

use crate::domain::entities::{LinkConfig, NewLinkConfig};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for link configurations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgConfigRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryConfigRepository`] - in-process fallback
/// - [`crate::infrastructure::persistence::FallbackConfigRepository`] - switches
///   from the first to the second when PostgreSQL becomes unavailable
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Stores a new configuration and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Duplicate`] if the keyword is already taken.
    /// Returns [`AppError::StoreUnavailable`] if the backend cannot be reached.
    async fn insert(&self, new_config: NewLinkConfig) -> Result<LinkConfig, AppError>;

    /// Returns every configuration, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the backend cannot be reached.
    async fn list_all(&self) -> Result<Vec<LinkConfig>, AppError>;

    /// Finds a configuration by exact, case-sensitive keyword.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the backend cannot be reached.
    async fn find_by_keyword(&self, keyword: &str) -> Result<Option<LinkConfig>, AppError>;

    /// Removes a configuration by id.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the backend cannot be reached.
    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError>;

    /// Short name of the backend serving requests, for health output.
    fn backend_name(&self) -> &'static str;
}
