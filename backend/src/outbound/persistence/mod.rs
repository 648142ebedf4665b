//! PostgreSQL persistence adapters.
//!
//! Both repositories upsert on their primary key, so a re-fetched record or a
//! re-submitted configuration value simply replaces the stored row.

mod diesel_config_repository;
mod diesel_person_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_config_repository::DieselConfigRepository;
pub use diesel_person_repository::DieselPersonRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
