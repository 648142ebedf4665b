//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Previously resolved directory records, keyed by identifier.
    people (crsid) {
        crsid -> Varchar,
        display_name -> Text,
        registered_name -> Text,
        surname -> Text,
        institution -> Text,
        college -> Text,
        status -> Text,
        last_updated -> Timestamptz,
    }
}

diesel::table! {
    /// Operator-supplied configuration values.
    config (key) {
        key -> Varchar,
        value -> Text,
        last_updated -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(people, config);
