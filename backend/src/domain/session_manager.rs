//! Owner of the shared directory session.
//!
//! One mutex guards the token for both reads and refreshes, so a refresh is
//! never observed half-done and at most one login is in flight. A refresh
//! re-checks the token after taking the lock: when another caller has
//! already replaced the stale token the call returns without logging in.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CredentialError, CredentialSource, IdentityProvider, IdentityProviderError, SessionProvider,
    SessionRefreshError,
};
use crate::domain::{ConfigKey, DirectoryCredentials, SessionToken};

/// [`SessionProvider`] that logs in through an [`IdentityProvider`].
pub struct SessionManager<I> {
    identity_provider: Arc<I>,
    credentials: Arc<dyn CredentialSource>,
    token: Mutex<SessionToken>,
}

impl<I> SessionManager<I> {
    /// Create a manager holding the "no session yet" token.
    pub fn new(identity_provider: Arc<I>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            identity_provider,
            credentials,
            token: Mutex::new(SessionToken::empty()),
        }
    }

    async fn credential(&self, key: ConfigKey) -> Result<String, SessionRefreshError> {
        self.credentials.get(key).await.map_err(|err| match err {
            CredentialError::NotConfigured { key } => SessionRefreshError::config_missing(key),
            CredentialError::Backend { message } => SessionRefreshError::credentials(message),
        })
    }

    async fn login_credentials(&self) -> Result<DirectoryCredentials, SessionRefreshError> {
        let user_id = self.credential(ConfigKey::UserId).await?;
        let password = self.credential(ConfigKey::Password).await?;
        Ok(DirectoryCredentials::new(user_id, password))
    }
}

fn map_login_error(error: IdentityProviderError) -> SessionRefreshError {
    match error {
        IdentityProviderError::Rejected => SessionRefreshError::login_rejected(),
        IdentityProviderError::Transport { message } => SessionRefreshError::transport(message),
        IdentityProviderError::Timeout { message } => SessionRefreshError::timeout(message),
    }
}

#[async_trait]
impl<I> SessionProvider for SessionManager<I>
where
    I: IdentityProvider,
{
    async fn current(&self) -> SessionToken {
        self.token.lock().await.clone()
    }

    async fn refresh(&self, stale: &SessionToken) -> Result<(), SessionRefreshError> {
        let mut token = self.token.lock().await;
        if *token != *stale {
            debug!("session already refreshed by another caller");
            return Ok(());
        }

        let credentials = self.login_credentials().await?;
        let issued = self
            .identity_provider
            .login(&credentials)
            .await
            .map_err(map_login_error)
            .inspect_err(|err| warn!(error = %err, "directory login failed"))?;

        match issued {
            Some(fresh) if fresh != *stale => {
                *token = fresh;
                info!("directory session refreshed");
                Ok(())
            }
            _ => {
                warn!("directory login did not rotate the session");
                Err(SessionRefreshError::session_unchanged())
            }
        }
    }
}
