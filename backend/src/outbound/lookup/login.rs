//! Reqwest-backed login against the single-sign-on identity provider.
//!
//! Each login runs on a fresh client with its own cookie jar so sessions from
//! earlier attempts never leak into the result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};
use tracing::debug;

use super::{SESSION_COOKIE, same_host};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{DirectoryCredentials, SessionToken};

/// Protocol version expected by the login form.
const PROTOCOL_VERSION: &str = "3";

/// Identity provider adapter that submits the login form.
pub struct IdentityProviderHttpLogin {
    login_url: Url,
    directory_url: Url,
    timeout: Duration,
}

impl IdentityProviderHttpLogin {
    /// `directory_url` is both the post-login target and the cookie scope the
    /// session is read from.
    pub fn new(login_url: Url, directory_url: Url, timeout: Duration) -> Self {
        Self {
            login_url,
            directory_url,
            timeout,
        }
    }

    fn session_from(&self, jar: &Jar) -> Option<SessionToken> {
        let cookies = jar.cookies(&self.directory_url)?;
        let cookies = cookies.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| SessionToken::new(value))
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

#[async_trait]
impl IdentityProvider for IdentityProviderHttpLogin {
    async fn login(
        &self,
        credentials: &DirectoryCredentials,
    ) -> Result<Option<SessionToken>, IdentityProviderError> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(self.timeout)
            .build()
            .map_err(map_transport_error)?;

        let form = [
            ("ver", PROTOCOL_VERSION),
            ("url", self.directory_url.as_str()),
            ("userid", credentials.user_id()),
            ("pwd", credentials.password()),
        ];
        let response = client
            .post(self.login_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        if same_host(response.url(), &self.login_url) {
            debug!(status = response.status().as_u16(), "login stayed on identity provider");
            return Err(IdentityProviderError::rejected());
        }

        Ok(self.session_from(&jar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Upstreams {
        directory: MockServer,
        identity: MockServer,
    }

    impl Upstreams {
        async fn start() -> Self {
            Self {
                directory: MockServer::start().await,
                identity: MockServer::start().await,
            }
        }

        fn login(&self, timeout: Duration) -> IdentityProviderHttpLogin {
            let login_url =
                Url::parse(&format!("{}/auth/authenticate2.html", self.identity.uri()))
                    .expect("login URL");
            let directory_url =
                Url::parse(&format!("{}/", self.directory.uri())).expect("directory URL");
            IdentityProviderHttpLogin::new(login_url, directory_url, timeout)
        }
    }

    fn credentials() -> DirectoryCredentials {
        DirectoryCredentials::new("ab123", "hunter2")
    }

    async fn mount_login_redirect(upstreams: &Upstreams) {
        Mock::given(method("POST"))
            .and(path("/auth/authenticate2.html"))
            .and(body_string_contains("ver=3"))
            .and(body_string_contains("userid=ab123"))
            .and(body_string_contains("pwd=hunter2"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/", upstreams.directory.uri()).as_str()),
            )
            .expect(1)
            .mount(&upstreams.identity)
            .await;
    }

    #[tokio::test]
    async fn successful_login_returns_directory_session() {
        let upstreams = Upstreams::start().await;
        mount_login_redirect(&upstreams).await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "JSESSIONID=fresh-session; Path=/"),
            )
            .mount(&upstreams.directory)
            .await;

        let token = upstreams
            .login(Duration::from_secs(5))
            .login(&credentials())
            .await
            .expect("login succeeds");
        assert_eq!(token, Some(SessionToken::new("fresh-session")));
    }

    #[tokio::test]
    async fn login_without_session_cookie_returns_none() {
        let upstreams = Upstreams::start().await;
        mount_login_redirect(&upstreams).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&upstreams.directory)
            .await;

        let token = upstreams
            .login(Duration::from_secs(5))
            .login(&credentials())
            .await
            .expect("login succeeds");
        assert_eq!(token, None);
    }

    #[tokio::test]
    async fn staying_on_identity_provider_is_a_rejection() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/authenticate2.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Unrecognised password"))
            .mount(&upstreams.identity)
            .await;

        let error = upstreams
            .login(Duration::from_secs(5))
            .login(&credentials())
            .await
            .expect_err("login rejected");
        assert_eq!(error, IdentityProviderError::Rejected);
    }

    #[tokio::test]
    async fn slow_identity_provider_times_out() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&upstreams.identity)
            .await;

        let error = upstreams
            .login(Duration::from_millis(50))
            .login(&credentials())
            .await
            .expect_err("timeout");
        assert!(matches!(error, IdentityProviderError::Timeout { .. }));
    }
}
