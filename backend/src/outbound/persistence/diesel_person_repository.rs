//! PostgreSQL-backed `PersonRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{Crsid, Person, PersonProfile};

use super::error_mapping::map_diesel_error;
use super::models::PersonRow;
use super::pool::{DbPool, PoolError};
use super::schema::people;

/// Diesel-backed store of previously resolved records.
#[derive(Clone)]
pub struct DieselPersonRepository {
    pool: DbPool,
}

impl DieselPersonRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PersonRepositoryError {
    PersonRepositoryError::connection(error.into_message())
}

fn map_query_error(error: diesel::result::Error) -> PersonRepositoryError {
    map_diesel_error(
        error,
        PersonRepositoryError::query,
        PersonRepositoryError::connection,
    )
}

fn row_to_person(row: PersonRow) -> Option<Person> {
    let crsid = Crsid::new(&row.crsid)
        .inspect_err(|err| warn!(crsid = %row.crsid, error = %err, "skipping stored person"))
        .ok()?;
    let profile = PersonProfile {
        display_name: row.display_name,
        registered_name: row.registered_name,
        surname: row.surname,
        institution: row.institution,
        college: row.college,
        status: row.status,
    };
    Some(Person::new(crsid, profile, row.last_updated))
}

fn person_to_row(person: &Person) -> PersonRow {
    let (crsid, profile, last_updated) = person.clone().into_parts();
    PersonRow {
        crsid: crsid.into(),
        display_name: profile.display_name,
        registered_name: profile.registered_name,
        surname: profile.surname,
        institution: profile.institution,
        college: profile.college,
        status: profile.status,
        last_updated,
    }
}

#[async_trait]
impl PersonRepository for DieselPersonRepository {
    async fn find(&self, crsid: &Crsid) -> Result<Option<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PersonRow> = people::table
            .filter(people::crsid.eq(crsid.as_ref()))
            .select(PersonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_query_error)?;

        Ok(row.and_then(row_to_person))
    }

    async fn save(&self, person: &Person) -> Result<(), PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = person_to_row(person);

        diesel::insert_into(people::table)
            .values(&row)
            .on_conflict(people::crsid)
            .do_update()
            .set((
                people::display_name.eq(excluded(people::display_name)),
                people::registered_name.eq(excluded(people::registered_name)),
                people::surname.eq(excluded(people::surname)),
                people::institution.eq(excluded(people::institution)),
                people::college.eq(excluded(people::college)),
                people::status.eq(excluded(people::status)),
                people::last_updated.eq(excluded(people::last_updated)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_query_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_person;

    #[test]
    fn rows_round_trip_through_the_domain_record() {
        let person = sample_person("ab123");
        let row = person_to_row(&person);

        assert_eq!(row.crsid, "ab123");
        assert_eq!(row.display_name, "Person ab123");
        assert_eq!(row_to_person(row), Some(person));
    }

    #[test]
    fn rows_with_invalid_identifiers_are_skipped() {
        let mut row = person_to_row(&sample_person("ab123"));
        row.crsid = "not valid".to_owned();
        assert_eq!(row_to_person(row), None);
    }
}
