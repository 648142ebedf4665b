//! In-process record cache.
//!
//! Records are stored as JSON strings keyed by identifier behind a single
//! reader/writer lock. The table is created eagerly with room for
//! [`DEFAULT_CAPACITY`] entries and grows without eviction: one entry per
//! distinct identifier ever resolved stays small for a directory proxy.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{PersonCache, PersonCacheError};
use crate::domain::{Crsid, Person};

/// Initial table size; a sizing hint rather than a bound.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Process-wide identifier to serialised record map.
#[derive(Debug)]
pub struct InMemoryPersonCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryPersonCache {
    /// Create an empty cache with the default capacity hint.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty cache sized for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPersonCache {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> PersonCacheError {
    PersonCacheError::backend("cache lock poisoned")
}

#[async_trait]
impl PersonCache for InMemoryPersonCache {
    async fn get(&self, crsid: &Crsid) -> Result<Option<Person>, PersonCacheError> {
        let encoded = {
            let entries = self.entries.read().map_err(poisoned)?;
            entries.get(crsid.as_ref()).cloned()
        };
        encoded
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|err| PersonCacheError::serialization(err.to_string()))
            })
            .transpose()
    }

    async fn put(&self, person: &Person) -> Result<(), PersonCacheError> {
        let json = serde_json::to_string(person)
            .map_err(|err| PersonCacheError::serialization(err.to_string()))?;
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(person.crsid().to_string(), json);
        Ok(())
    }
}
