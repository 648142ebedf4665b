//! Shared fixtures for unit tests across the crate.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Crsid, Person, PersonProfile};

/// Clock frozen at a fixed instant.
pub struct FixtureClock {
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub fn crsid(raw: &str) -> Crsid {
    Crsid::new(raw).expect("valid fixture crsid")
}

/// Record for `raw` with a recognisable display name.
pub fn sample_person(raw: &str) -> Person {
    let profile = PersonProfile {
        display_name: format!("Person {raw}"),
        surname: "Doe".to_owned(),
        college: "King's College".to_owned(),
        ..PersonProfile::default()
    };
    Person::new(crsid(raw), profile, fixture_timestamp())
}
