//! In-memory configuration store used when PostgreSQL is unavailable.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{LinkConfig, NewLinkConfig};
use crate::domain::repositories::ConfigRepository;
use crate::error::AppError;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Process-local configuration storage.
///
/// Contents live only as long as the process. Insert and delete take the
/// write lock, so the keyword uniqueness check and the push are atomic.
#[derive(Default)]
pub struct MemoryConfigRepository {
    configs: RwLock<Vec<LinkConfig>>,
}

impl MemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored configurations.
    pub async fn len(&self) -> usize {
        self.configs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.configs.read().await.is_empty()
    }
}

/// Generates an id of the form `<unix millis><9 random base36 chars>`.
fn generate_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}

#[async_trait]
impl ConfigRepository for MemoryConfigRepository {
    async fn insert(&self, new_config: NewLinkConfig) -> Result<LinkConfig, AppError> {
        let mut configs = self.configs.write().await;

        if configs.iter().any(|c| c.keyword == new_config.keyword) {
            return Err(AppError::duplicate(
                "Keyword already exists",
                json!({ "keyword": new_config.keyword }),
            ));
        }

        let config = new_config.into_config(generate_id(), Utc::now());
        configs.push(config.clone());

        Ok(config)
    }

    async fn list_all(&self) -> Result<Vec<LinkConfig>, AppError> {
        let mut configs = self.configs.read().await.clone();
        // Later inserts first among equal timestamps.
        configs.reverse();
        configs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(configs)
    }

    async fn find_by_keyword(&self, keyword: &str) -> Result<Option<LinkConfig>, AppError> {
        Ok(self
            .configs
            .read()
            .await
            .iter()
            .find(|c| c.keyword == keyword)
            .cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let mut configs = self.configs.write().await;
        let before = configs.len();
        configs.retain(|c| c.id != id);
        Ok(configs.len() != before)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
