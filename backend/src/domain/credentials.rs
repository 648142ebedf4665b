//! Configuration names and the secrets stored under them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// Names of the values an operator can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Shared secret inbound API callers present as their basic-auth username.
    ApiKey,
    /// Login identifier for the identity provider.
    UserId,
    /// Password for the identity provider.
    Password,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::ApiKey, ConfigKey::UserId, ConfigKey::Password];

    /// Name used in storage and in the configuration form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "apikey",
            Self::UserId => "userid",
            Self::Password => "pwd",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a configuration name is not one of [`ConfigKey::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown configuration key: {0}")]
pub struct UnknownConfigKey(pub String);

impl FromStr for ConfigKey {
    type Err = UnknownConfigKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| UnknownConfigKey(s.to_owned()))
    }
}

/// Persisted configuration value and the time it was written.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub value: String,
    pub last_updated: DateTime<Utc>,
}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("value", &"<redacted>")
            .field("last_updated", &self.last_updated)
            .finish()
    }
}

/// Login credentials for the identity provider.
///
/// # Examples
/// ```
/// use lookup_proxy::domain::DirectoryCredentials;
///
/// let creds = DirectoryCredentials::new("ab123", "hunter2");
/// assert_eq!(creds.user_id(), "ab123");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DirectoryCredentials {
    user_id: String,
    password: Zeroizing<String>,
}

impl DirectoryCredentials {
    /// Bundle a login id and password for the identity provider.
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Identity-provider login id.
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for DirectoryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryCredentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}
