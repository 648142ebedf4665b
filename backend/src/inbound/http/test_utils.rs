//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::web;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::state::HttpState;
use crate::domain::ConfigKey;
use crate::domain::ports::{CredentialError, MockCredentialSource, MockPersonLookup};

/// API key configured by [`credentials_with_api_key`].
pub const TEST_API_KEY: &str = "test-api-key";

/// `Authorization` header presenting `username` with an arbitrary password.
pub fn basic_auth(username: &str) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{username}:unused"));
    (header::AUTHORIZATION, format!("Basic {encoded}"))
}

/// Credential source answering `apikey` reads with [`TEST_API_KEY`].
pub fn credentials_with_api_key() -> MockCredentialSource {
    let mut credentials = MockCredentialSource::new();
    credentials
        .expect_get()
        .withf(|key| *key == ConfigKey::ApiKey)
        .returning(|_| Ok(TEST_API_KEY.to_owned()));
    credentials
}

/// Credential source where nothing has been configured yet.
pub fn unconfigured_credentials() -> MockCredentialSource {
    let mut credentials = MockCredentialSource::new();
    credentials
        .expect_get()
        .returning(|key| Err(CredentialError::not_configured(key)));
    credentials
}

pub fn http_state(
    lookup: MockPersonLookup,
    credentials: MockCredentialSource,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(lookup), Arc::new(credentials)))
}
