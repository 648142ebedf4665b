//! Memoizing credential store.
//!
//! Values are read from the configuration repository at most once per key
//! while they stay unchanged. A failed read is not remembered, so the next
//! call retries. Writes go to the repository first and only then replace the
//! memoized value, keeping readers from seeing a superseded secret.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    ConfigRepository, ConfigRepositoryError, CredentialError, CredentialSource,
};
use crate::domain::{ConfigEntry, ConfigKey};

/// [`CredentialSource`] backed by a [`ConfigRepository`].
pub struct CredentialStore<C> {
    repository: Arc<C>,
    clock: Arc<dyn Clock>,
    values: Mutex<HashMap<ConfigKey, Zeroizing<String>>>,
}

impl<C> CredentialStore<C> {
    /// Wrap a configuration repository; `clock` stamps every write.
    pub fn new(repository: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            values: Mutex::new(HashMap::with_capacity(ConfigKey::ALL.len())),
        }
    }
}

fn map_repository_error(error: ConfigRepositoryError) -> CredentialError {
    CredentialError::backend(error.to_string())
}

#[async_trait]
impl<C> CredentialSource for CredentialStore<C>
where
    C: ConfigRepository,
{
    async fn get(&self, key: ConfigKey) -> Result<String, CredentialError> {
        let mut values = self.values.lock().await;
        if let Some(value) = values.get(&key) {
            return Ok(value.to_string());
        }

        let entry = self
            .repository
            .find(key)
            .await
            .map_err(map_repository_error)?
            .filter(|entry| !entry.value.is_empty())
            .ok_or_else(|| CredentialError::not_configured(key))?;

        debug!(%key, "memoized configuration value");
        values.insert(key, Zeroizing::new(entry.value.clone()));
        Ok(entry.value)
    }

    async fn set(&self, key: ConfigKey, value: &str) -> Result<(), CredentialError> {
        let entry = ConfigEntry {
            value: value.to_owned(),
            last_updated: self.clock.utc(),
        };

        let mut values = self.values.lock().await;
        self.repository
            .save(key, &entry)
            .await
            .map_err(map_repository_error)?;

        if value.is_empty() {
            values.remove(&key);
        } else {
            values.insert(key, Zeroizing::new(entry.value));
        }
        info!(%key, "configuration value updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockConfigRepository;
    use crate::test_support::{fixture_clock, fixture_timestamp};
    use rstest::rstest;

    fn entry(value: &str) -> ConfigEntry {
        ConfigEntry {
            value: value.to_owned(),
            last_updated: fixture_timestamp(),
        }
    }

    fn make_store(repo: MockConfigRepository) -> CredentialStore<MockConfigRepository> {
        CredentialStore::new(Arc::new(repo), fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_reads_hit_the_repository_once() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find()
            .withf(|key| *key == ConfigKey::UserId)
            .times(1)
            .return_once(|_| Ok(Some(entry("ab123"))));
        let store = make_store(repo);

        for _ in 0..3 {
            assert_eq!(store.get(ConfigKey::UserId).await.expect("value"), "ab123");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn keys_are_memoized_independently() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find().times(2).returning(|key| {
            Ok(Some(entry(match key {
                ConfigKey::UserId => "ab123",
                _ => "secret",
            })))
        });
        let store = make_store(repo);

        assert_eq!(store.get(ConfigKey::UserId).await.expect("id"), "ab123");
        assert_eq!(store.get(ConfigKey::Password).await.expect("pwd"), "secret");
        assert_eq!(store.get(ConfigKey::UserId).await.expect("id"), "ab123");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_read_is_retried_on_next_call() {
        let mut repo = MockConfigRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_find()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Err(ConfigRepositoryError::connection("database offline")));
        repo.expect_find()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Ok(Some(entry("key-1"))));
        let store = make_store(repo);

        let error = store.get(ConfigKey::ApiKey).await.expect_err("backend error");
        assert!(matches!(error, CredentialError::Backend { .. }));
        assert_eq!(store.get(ConfigKey::ApiKey).await.expect("value"), "key-1");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[tokio::test]
    async fn absent_or_empty_values_are_not_configured(#[case] stored: Option<&'static str>) {
        let mut repo = MockConfigRepository::new();
        repo.expect_find()
            .times(2)
            .returning(move |_| Ok(stored.map(entry)));
        let store = make_store(repo);

        for _ in 0..2 {
            let error = store.get(ConfigKey::ApiKey).await.expect_err("missing");
            assert_eq!(error, CredentialError::not_configured(ConfigKey::ApiKey));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn set_writes_through_with_clock_timestamp_and_refreshes_memo() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find()
            .times(1)
            .return_once(|_| Ok(Some(entry("old-secret"))));
        repo.expect_save()
            .withf(|key, saved| {
                *key == ConfigKey::Password
                    && saved.value == "new-secret"
                    && saved.last_updated == fixture_timestamp()
            })
            .times(1)
            .return_once(|_, _| Ok(()));
        let store = make_store(repo);

        assert_eq!(store.get(ConfigKey::Password).await.expect("old"), "old-secret");
        store
            .set(ConfigKey::Password, "new-secret")
            .await
            .expect("set succeeds");
        assert_eq!(store.get(ConfigKey::Password).await.expect("new"), "new-secret");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_write_keeps_previous_value() {
        let mut repo = MockConfigRepository::new();
        repo.expect_find()
            .times(1)
            .return_once(|_| Ok(Some(entry("old-secret"))));
        repo.expect_save()
            .times(1)
            .return_once(|_, _| Err(ConfigRepositoryError::query("constraint violated")));
        let store = make_store(repo);

        assert_eq!(store.get(ConfigKey::Password).await.expect("old"), "old-secret");
        let error = store
            .set(ConfigKey::Password, "new-secret")
            .await
            .expect_err("write fails");
        assert!(matches!(error, CredentialError::Backend { .. }));
        assert_eq!(store.get(ConfigKey::Password).await.expect("old"), "old-secret");
    }
}
