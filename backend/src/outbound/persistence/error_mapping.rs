//! Diesel error mapping shared by the repositories.

use tracing::debug;

/// Map a Diesel error onto a repository's query/connection constructors.
///
/// Database messages are logged at debug level and kept out of the returned
/// error.
pub(crate) fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            query("database value conversion failed")
        }
        _ => query("database error"),
    }
}
