//! Lookup orchestration across the cache tiers and the directory.
//!
//! Resolution order: in-memory cache, persistent repository, then a bounded
//! fetch loop against the directory. An `AuthRequired` answer triggers one
//! session refresh followed by a second fetch; every other directory failure
//! ends the lookup at once. Cache and repository failures are logged and
//! otherwise ignored because neither tier is a source of truth.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    DirectorySource, DirectorySourceError, PersonCache, PersonLookup, PersonRepository,
    SessionProvider, SessionRefreshError,
};
use crate::domain::{Crsid, Error, Person};

/// Number of directory fetches a single lookup may issue.
pub const MAX_FETCH_ATTEMPTS: usize = 2;

/// [`PersonLookup`] implementation wiring the driven ports together.
#[derive(Clone)]
pub struct PersonLookupService {
    cache: Arc<dyn PersonCache>,
    repository: Arc<dyn PersonRepository>,
    directory: Arc<dyn DirectorySource>,
    sessions: Arc<dyn SessionProvider>,
}

impl PersonLookupService {
    /// Compose the lookup tiers and the session provider.
    pub fn new(
        cache: Arc<dyn PersonCache>,
        repository: Arc<dyn PersonRepository>,
        directory: Arc<dyn DirectorySource>,
        sessions: Arc<dyn SessionProvider>,
    ) -> Self {
        Self {
            cache,
            repository,
            directory,
            sessions,
        }
    }

    async fn cached(&self, crsid: &Crsid) -> Option<Person> {
        self.cache
            .get(crsid)
            .await
            .inspect_err(|err| warn!(%crsid, error = %err, "person cache read failed"))
            .ok()
            .flatten()
    }

    async fn stored(&self, crsid: &Crsid) -> Option<Person> {
        self.repository
            .find(crsid)
            .await
            .inspect_err(|err| warn!(%crsid, error = %err, "person repository read failed"))
            .ok()
            .flatten()
    }

    async fn remember(&self, person: &Person) {
        if let Err(err) = self.cache.put(person).await {
            warn!(crsid = %person.crsid(), error = %err, "person cache write failed");
        }
    }

    async fn persist(&self, person: &Person) {
        if let Err(err) = self.repository.save(person).await {
            warn!(crsid = %person.crsid(), error = %err, "person repository write failed");
        }
    }

    async fn fetch_with_refresh(&self, crsid: &Crsid) -> Result<Person, Error> {
        let mut refresh_error = None;

        for attempt in 1..=MAX_FETCH_ATTEMPTS {
            let token = self.sessions.current().await;
            match self.directory.fetch_person(crsid, &token).await {
                Ok(person) => return Ok(person),
                Err(DirectorySourceError::AuthRequired) => {
                    debug!(%crsid, attempt, "directory session rejected");
                    if attempt == MAX_FETCH_ATTEMPTS {
                        break;
                    }
                    match self.sessions.refresh(&token).await {
                        Ok(()) => refresh_error = None,
                        Err(err @ SessionRefreshError::ConfigMissing { .. }) => {
                            return Err(map_refresh_error(err));
                        }
                        Err(err) => {
                            warn!(%crsid, error = %err, "session refresh failed");
                            refresh_error = Some(err);
                        }
                    }
                }
                Err(err) => return Err(map_directory_error(err)),
            }
        }

        Err(refresh_error.map_or_else(
            || map_directory_error(DirectorySourceError::auth_required()),
            map_refresh_error,
        ))
    }
}

fn map_directory_error(error: DirectorySourceError) -> Error {
    let message = error.to_string();
    match error {
        DirectorySourceError::NotFound { crsid } => {
            Error::not_found(message).with_details(json!({ "crsid": crsid }))
        }
        DirectorySourceError::UpstreamStatus { status } => {
            Error::upstream(message).with_details(json!({ "status": status }))
        }
        _ => Error::upstream(message),
    }
}

fn map_refresh_error(error: SessionRefreshError) -> Error {
    Error::upstream(error.to_string())
}

#[async_trait]
impl PersonLookup for PersonLookupService {
    async fn lookup(&self, crsid: &Crsid) -> Result<Person, Error> {
        if let Some(person) = self.cached(crsid).await {
            debug!(%crsid, "person cache hit");
            return Ok(person);
        }

        if let Some(person) = self.stored(crsid).await {
            debug!(%crsid, "person repository hit");
            self.remember(&person).await;
            return Ok(person);
        }

        let person = self.fetch_with_refresh(crsid).await?;
        info!(%crsid, "person fetched from directory");
        self.persist(&person).await;
        self.remember(&person).await;
        Ok(person)
    }
}

#[cfg(test)]
#[path = "person_lookup_service_tests.rs"]
mod tests;
