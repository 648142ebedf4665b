//! Port for the process-wide record cache.
use async_trait::async_trait;

use crate::domain::{Crsid, Person};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum PersonCacheError {
        /// Cache storage could not be accessed.
        Backend { message: String } => "person cache backend failure: {message}",
        /// Cached content could not be encoded or decoded.
        Serialization { message: String } =>
            "person cache serialisation failed: {message}",
    }
}

/// Fast in-process lookup keyed by identifier.
///
/// Implementations must not perform remote I/O.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonCache: Send + Sync {
    /// Read a cached record.
    async fn get(&self, crsid: &Crsid) -> Result<Option<Person>, PersonCacheError>;

    /// Insert or replace the record stored under its identifier.
    async fn put(&self, person: &Person) -> Result<(), PersonCacheError>;
}
