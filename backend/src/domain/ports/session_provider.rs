//! Driving port over the shared directory session.
use async_trait::async_trait;

use crate::domain::{ConfigKey, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Reasons a session refresh failed.
    pub enum SessionRefreshError {
        /// A login credential has not been configured.
        ConfigMissing { key: ConfigKey } =>
            "login credential `{key}` is not configured",
        /// Credentials could not be read from the store.
        Credentials { message: String } =>
            "login credentials unavailable: {message}",
        /// The identity provider refused the credentials.
        LoginRejected => "identity provider rejected the login",
        /// Login succeeded but the session did not change.
        SessionUnchanged => "login did not produce a new session",
        /// Network transport failed during login.
        Transport { message: String } => "login transport failed: {message}",
        /// Login exceeded its deadline.
        Timeout { message: String } => "login timeout: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Token currently used for directory requests.
    async fn current(&self) -> SessionToken;

    /// Replace `stale` with a fresh session unless another caller already
    /// has.
    async fn refresh(&self, stale: &SessionToken) -> Result<(), SessionRefreshError>;
}
