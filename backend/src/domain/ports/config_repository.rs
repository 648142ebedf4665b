//! Port for durable storage of configuration values.
use async_trait::async_trait;

use crate::domain::{ConfigEntry, ConfigKey};

use super::define_port_error;

define_port_error! {
    /// Errors raised by configuration repository adapters.
    pub enum ConfigRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "config repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "config repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Read the stored entry for `key`; `None` when it was never set.
    async fn find(&self, key: ConfigKey) -> Result<Option<ConfigEntry>, ConfigRepositoryError>;

    /// Insert or replace the entry for `key`.
    async fn save(&self, key: ConfigKey, entry: &ConfigEntry)
    -> Result<(), ConfigRepositoryError>;
}
