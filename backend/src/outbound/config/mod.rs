//! In-memory configuration repository for database-less deployments.
//!
//! Values written through `/configure` live only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ConfigRepository, ConfigRepositoryError};
use crate::domain::{ConfigEntry, ConfigKey};

#[derive(Debug, Default)]
pub struct InMemoryConfigRepository {
    entries: RwLock<HashMap<ConfigKey, ConfigEntry>>,
}

impl InMemoryConfigRepository {
    /// Create a repository pre-populated with `seeds`.
    pub fn seeded(seeds: impl IntoIterator<Item = (ConfigKey, ConfigEntry)>) -> Self {
        Self {
            entries: RwLock::new(seeds.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn find(&self, key: ConfigKey) -> Result<Option<ConfigEntry>, ConfigRepositoryError> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn save(
        &self,
        key: ConfigKey,
        entry: &ConfigEntry,
    ) -> Result<(), ConfigRepositoryError> {
        self.entries.write().await.insert(key, entry.clone());
        Ok(())
    }
}
