//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{config, people};

/// Row read from and written to the `people` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PersonRow {
    pub crsid: String,
    pub display_name: String,
    pub registered_name: String,
    pub surname: String,
    pub institution: String,
    pub college: String,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}

/// Row read from the `config` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConfigRow {
    pub value: String,
    pub last_updated: DateTime<Utc>,
}

/// Insertable struct for upserting configuration values.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = config)]
pub(crate) struct NewConfigRow<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub last_updated: DateTime<Utc>,
}
