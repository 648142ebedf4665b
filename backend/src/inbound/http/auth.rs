//! Basic-auth gate for inbound callers.
//!
//! API callers present the configured API key as their basic-auth username;
//! the password part is accepted but not checked. The gate runs as an Actix
//! extractor so a rejected request never reaches the lookup service.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::state::HttpState;
use crate::domain::ports::{CredentialError, CredentialSource};
use crate::domain::{ConfigKey, Error};

/// Challenge sent when a request carries no credentials.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="Cambridge Lookup API""#;

/// Credentials decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl BasicCredentials {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Reasons the gate refused a request.
#[derive(Debug, thiserror::Error)]
pub enum BasicAuthError {
    #[error("401 Unauthorized")]
    Missing,
    #[error("bad syntax")]
    BadSyntax,
    #[error("authorization failed")]
    Rejected,
    #[error(transparent)]
    Unavailable(Error),
}

impl BasicAuthError {
    fn to_domain(&self) -> Error {
        match self {
            Self::Missing | Self::Rejected => Error::unauthorized(self.to_string()),
            Self::BadSyntax => Error::invalid_request(self.to_string()),
            Self::Unavailable(error) => error.clone(),
        }
    }
}

impl ResponseError for BasicAuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.to_domain().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = self.to_domain().error_response();
        if matches!(self, Self::Missing) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response
    }
}

/// Decode an `Authorization` header value.
pub fn parse_authorization(
    value: Option<&HeaderValue>,
) -> Result<BasicCredentials, BasicAuthError> {
    let value = value.ok_or(BasicAuthError::Missing)?;
    let value = value.to_str().map_err(|_| BasicAuthError::BadSyntax)?;
    let (scheme, encoded) = value.split_once(' ').ok_or(BasicAuthError::BadSyntax)?;
    if scheme != "Basic" {
        return Err(BasicAuthError::BadSyntax);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BasicAuthError::BadSyntax)?;
    let decoded = Zeroizing::new(String::from_utf8(decoded).map_err(|_| BasicAuthError::BadSyntax)?);
    let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::BadSyntax)?;

    Ok(BasicCredentials {
        username: username.to_owned(),
        password: Zeroizing::new(password.to_owned()),
    })
}

fn check_api_key(api_key: &str, credentials: &BasicCredentials) -> Result<(), BasicAuthError> {
    if !api_key.is_empty() && credentials.username() == api_key {
        Ok(())
    } else {
        debug!("basic-auth username does not match the API key");
        Err(BasicAuthError::Rejected)
    }
}

fn backend_unavailable(message: String) -> BasicAuthError {
    warn!(%message, "API key lookup failed");
    BasicAuthError::Unavailable(Error::service_unavailable(
        "credential store is unavailable",
    ))
}

/// Configured API key, `None` when it has not been set yet.
async fn configured_api_key(
    credentials: &dyn CredentialSource,
) -> Result<Option<String>, BasicAuthError> {
    match credentials.get(ConfigKey::ApiKey).await {
        Ok(key) => Ok(Some(key)),
        Err(CredentialError::NotConfigured { .. }) => Ok(None),
        Err(CredentialError::Backend { message }) => Err(backend_unavailable(message)),
    }
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, BasicAuthError> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| BasicAuthError::Unavailable(Error::internal("HTTP state is not registered")))
}

/// Proof that the request carried the configured API key.
#[derive(Debug, Clone, Copy)]
pub struct ApiCaller;

impl FromRequest for ApiCaller {
    type Error = BasicAuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req.headers().get(header::AUTHORIZATION).cloned();
        let state = http_state(req);
        Box::pin(async move {
            let state = state?;
            let credentials = parse_authorization(header.as_ref())?;
            let api_key = configured_api_key(state.credentials.as_ref())
                .await?
                .ok_or(BasicAuthError::Rejected)?;
            check_api_key(&api_key, &credentials)?;
            Ok(ApiCaller)
        })
    }
}

/// Access to the configuration form.
///
/// Open while no API key exists so a fresh deployment can be configured;
/// afterwards it requires the same credentials as [`ApiCaller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCaller {
    Bootstrap,
    Authenticated,
}

impl FromRequest for AdminCaller {
    type Error = BasicAuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req.headers().get(header::AUTHORIZATION).cloned();
        let state = http_state(req);
        Box::pin(async move {
            let state = state?;
            let Some(api_key) = configured_api_key(state.credentials.as_ref()).await? else {
                warn!("configuration form accessed before an API key was set");
                return Ok(AdminCaller::Bootstrap);
            };
            let credentials = parse_authorization(header.as_ref())?;
            check_api_key(&api_key, &credentials)?;
            Ok(AdminCaller::Authenticated)
        })
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
