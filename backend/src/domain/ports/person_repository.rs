//! Port for durable storage of previously resolved records.
//!
//! The store is advisory: the lookup service treats it as a second cache
//! tier and ignores write failures.

use async_trait::async_trait;

use crate::domain::{Crsid, Person};

use super::define_port_error;

define_port_error! {
    /// Errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "person repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "person repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Fetch the stored record for an identifier, if any.
    async fn find(&self, crsid: &Crsid) -> Result<Option<Person>, PersonRepositoryError>;

    /// Insert or replace the stored record.
    async fn save(&self, person: &Person) -> Result<(), PersonRepositoryError>;
}

/// Repository used when no database is configured.
///
/// Always misses and discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePersonRepository;

#[async_trait]
impl PersonRepository for FixturePersonRepository {
    async fn find(&self, _crsid: &Crsid) -> Result<Option<Person>, PersonRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _person: &Person) -> Result<(), PersonRepositoryError> {
        Ok(())
    }
}
