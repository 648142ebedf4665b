//! Driving port for reading and writing configured secrets.
use async_trait::async_trait;

use crate::domain::ConfigKey;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by credential lookups.
    pub enum CredentialError {
        /// No value has been stored under the key.
        NotConfigured { key: ConfigKey } => "configuration value `{key}` is not set",
        /// The backing store failed.
        Backend { message: String } => "credential store failure: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Read the value configured under `key`.
    async fn get(&self, key: ConfigKey) -> Result<String, CredentialError>;

    /// Store `value` under `key`.
    async fn set(&self, key: ConfigKey, value: &str) -> Result<(), CredentialError>;
}
