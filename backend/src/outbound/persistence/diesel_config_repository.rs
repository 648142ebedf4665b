//! PostgreSQL-backed `ConfigRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConfigRepository, ConfigRepositoryError};
use crate::domain::{ConfigEntry, ConfigKey};

use super::error_mapping::map_diesel_error;
use super::models::{ConfigRow, NewConfigRow};
use super::pool::{DbPool, PoolError};
use super::schema::config;

/// Diesel-backed store of configuration values.
#[derive(Clone)]
pub struct DieselConfigRepository {
    pool: DbPool,
}

impl DieselConfigRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ConfigRepositoryError {
    ConfigRepositoryError::connection(error.into_message())
}

fn map_query_error(error: diesel::result::Error) -> ConfigRepositoryError {
    map_diesel_error(
        error,
        ConfigRepositoryError::query,
        ConfigRepositoryError::connection,
    )
}

#[async_trait]
impl ConfigRepository for DieselConfigRepository {
    async fn find(&self, key: ConfigKey) -> Result<Option<ConfigEntry>, ConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ConfigRow> = config::table
            .filter(config::key.eq(key.as_str()))
            .select(ConfigRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_query_error)?;

        Ok(row.map(|row| ConfigEntry {
            value: row.value,
            last_updated: row.last_updated,
        }))
    }

    async fn save(
        &self,
        key: ConfigKey,
        entry: &ConfigEntry,
    ) -> Result<(), ConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewConfigRow {
            key: key.as_str(),
            value: entry.value.as_str(),
            last_updated: entry.last_updated,
        };

        diesel::insert_into(config::table)
            .values(&row)
            .on_conflict(config::key)
            .do_update()
            .set((
                config::value.eq(excluded(config::value)),
                config::last_updated.eq(excluded(config::last_updated)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_query_error)
    }
}
