//! Adapter selection and HTTP state assembly.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use lookup_proxy::domain::ports::{
    CredentialSource, FixturePersonRepository, PersonRepository,
};
use lookup_proxy::domain::{
    ConfigEntry, CredentialStore, PersonLookupService, SessionManager,
};
use lookup_proxy::inbound::http::state::HttpState;
use lookup_proxy::outbound::cache::InMemoryPersonCache;
use lookup_proxy::outbound::config::InMemoryConfigRepository;
use lookup_proxy::outbound::lookup::{DirectoryHttpSource, IdentityProviderHttpLogin};
use lookup_proxy::outbound::persistence::{DieselConfigRepository, DieselPersonRepository};

use super::ServerConfig;

fn build_credentials(config: &ServerConfig, clock: &Arc<dyn Clock>) -> Arc<dyn CredentialSource> {
    match &config.db_pool {
        Some(pool) => {
            let repository = Arc::new(DieselConfigRepository::new(pool.clone()));
            Arc::new(CredentialStore::new(repository, clock.clone()))
        }
        None => {
            let now = clock.utc();
            let seeds = config.config_seeds.iter().map(|(key, value)| {
                let entry = ConfigEntry {
                    value: value.clone(),
                    last_updated: now,
                };
                (*key, entry)
            });
            let repository = Arc::new(InMemoryConfigRepository::seeded(seeds));
            info!(
                seeded = config.config_seeds.len(),
                "using in-memory configuration store"
            );
            Arc::new(CredentialStore::new(repository, clock.clone()))
        }
    }
}

fn build_person_repository(config: &ServerConfig) -> Arc<dyn PersonRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselPersonRepository::new(pool.clone())),
        None => Arc::new(FixturePersonRepository),
    }
}

/// Wire every port behind the HTTP state.
///
/// # Errors
/// Returns [`std::io::Error`] when the directory HTTP client cannot be built.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let upstream = &config.upstream;

    let credentials = build_credentials(config, &clock);
    let identity_provider = Arc::new(IdentityProviderHttpLogin::new(
        upstream.login_url.clone(),
        upstream.directory_base_url.clone(),
        upstream.timeout,
    ));
    let sessions = Arc::new(SessionManager::new(identity_provider, credentials.clone()));
    let directory = DirectoryHttpSource::new(
        upstream.directory_base_url.clone(),
        upstream.login_url.clone(),
        upstream.timeout,
        clock,
    )
    .map_err(|err| std::io::Error::other(format!("directory client setup failed: {err}")))?;

    let lookup = PersonLookupService::new(
        Arc::new(InMemoryPersonCache::new()),
        build_person_repository(config),
        Arc::new(directory),
        sessions,
    );

    Ok(web::Data::new(HttpState::new(Arc::new(lookup), credentials)))
}
