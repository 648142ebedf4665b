//! Driven port for the single-sign-on login flow.
use async_trait::async_trait;

use crate::domain::{DirectoryCredentials, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the identity provider adapter.
    pub enum IdentityProviderError {
        /// Login landed back on the identity provider.
        Rejected => "identity provider rejected the login",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "identity provider transport failed: {message}",
        /// The login exceeded its deadline.
        Timeout { message: String } => "identity provider timeout: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Perform a login and return the directory session it established.
    ///
    /// `Ok(None)` means the login was accepted but no session cookie was
    /// issued for the directory.
    async fn login(
        &self,
        credentials: &DirectoryCredentials,
    ) -> Result<Option<SessionToken>, IdentityProviderError>;
}
