//! Driving port used by the HTTP adapter to resolve directory entries.
use async_trait::async_trait;

use crate::domain::{Crsid, Error, Person};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonLookup: Send + Sync {
    /// Resolve `crsid` through the cache tiers and, if needed, the directory.
    async fn lookup(&self, crsid: &Crsid) -> Result<Person, Error>;
}
