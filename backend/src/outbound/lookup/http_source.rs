//! Reqwest-backed directory source adapter.
//!
//! This adapter owns transport details only: building the profile URL,
//! presenting the session cookie, classifying the response and handing the
//! body to the profile parser.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, StatusCode, Url, header};
use tracing::debug;

use super::profile_parser::parse_person_profile;
use super::{SESSION_COOKIE, same_host};
use crate::domain::ports::{DirectorySource, DirectorySourceError};
use crate::domain::{Crsid, Person, SessionToken};

/// Directory client that issues one GET per lookup.
pub struct DirectoryHttpSource {
    client: Client,
    base_url: Url,
    login_url: Url,
    clock: Arc<dyn Clock>,
}

impl DirectoryHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `base_url` must end with `/`; profile paths are joined onto it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        login_url: Url,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            login_url,
            clock,
        })
    }

    fn profile_url(&self, crsid: &Crsid) -> Result<Url, DirectorySourceError> {
        self.base_url
            .join(&format!("person/crsid/{crsid}/details"))
            .map_err(|error| DirectorySourceError::transport(format!("invalid profile URL: {error}")))
    }
}

#[async_trait]
impl DirectorySource for DirectoryHttpSource {
    async fn fetch_person(
        &self,
        crsid: &Crsid,
        token: &SessionToken,
    ) -> Result<Person, DirectorySourceError> {
        let mut request = self.client.get(self.profile_url(crsid)?);
        if !token.is_empty() {
            request = request.header(
                header::COOKIE,
                format!("{SESSION_COOKIE}={}", token.as_str()),
            );
        }
        let response = request.send().await.map_err(map_transport_error)?;

        if same_host(response.url(), &self.login_url) {
            debug!(%crsid, "directory redirected to identity provider");
            return Err(DirectorySourceError::auth_required());
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DirectorySourceError::not_found(crsid.to_string()));
        }
        if !status.is_success() {
            return Err(DirectorySourceError::upstream_status(status.as_u16()));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let profile = parse_person_profile(&body);
        Ok(Person::new(crsid.clone(), profile, self.clock.utc()))
    }
}

fn map_transport_error(error: reqwest::Error) -> DirectorySourceError {
    if error.is_timeout() {
        DirectorySourceError::timeout(error.to_string())
    } else {
        DirectorySourceError::transport(error.to_string())
    }
}
