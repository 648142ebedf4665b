//! Directory person record and its identifier.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted identifier length.
pub const CRSID_MAX: usize = 16;

/// Validation errors returned by [`Crsid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrsidValidationError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for CrsidValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "crsid must not be empty"),
            Self::TooLong { max } => write!(f, "crsid must be at most {max} characters"),
            Self::InvalidCharacters => {
                write!(f, "crsid may only contain ASCII letters and digits")
            }
        }
    }
}

impl std::error::Error for CrsidValidationError {}

/// Directory identifier (for example `ab123`).
///
/// ## Invariants
/// - Trimmed, non-empty and at most [`CRSID_MAX`] characters.
/// - ASCII alphanumeric only; stored lower-cased.
///
/// # Examples
/// ```
/// use lookup_proxy::domain::Crsid;
///
/// let crsid = Crsid::new(" AB123 ").expect("valid crsid");
/// assert_eq!(crsid.as_ref(), "ab123");
/// assert!(Crsid::new("ab/123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crsid(String);

impl Crsid {
    /// Validate and normalise an identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CrsidValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CrsidValidationError::Empty);
        }
        if trimmed.chars().count() > CRSID_MAX {
            return Err(CrsidValidationError::TooLong { max: CRSID_MAX });
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CrsidValidationError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl AsRef<str> for Crsid {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Crsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Crsid> for String {
    fn from(value: Crsid) -> Self {
        value.0
    }
}

impl TryFrom<String> for Crsid {
    type Error = CrsidValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Fields scraped from a directory profile page.
///
/// Every field defaults to an empty string; the page does not guarantee any
/// of them is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonProfile {
    pub display_name: String,
    pub registered_name: String,
    pub surname: String,
    pub institution: String,
    pub college: String,
    pub status: String,
}

/// One resolved directory entry.
///
/// Immutable once built; a later lookup for the same identifier produces a
/// new value.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use lookup_proxy::domain::{Crsid, Person, PersonProfile};
///
/// let crsid = Crsid::new("ab123").expect("valid crsid");
/// let profile = PersonProfile {
///     display_name: "Jane Doe".into(),
///     ..PersonProfile::default()
/// };
/// let fetched_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let person = Person::new(crsid, profile, fetched_at);
/// assert_eq!(person.display_name(), "Jane Doe");
/// assert_eq!(person.college(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    #[serde(rename = "CRSID")]
    crsid: Crsid,
    display_name: String,
    registered_name: String,
    surname: String,
    institution: String,
    college: String,
    status: String,
    last_updated: DateTime<Utc>,
}

impl Person {
    /// Build a record from a scraped profile and the time it was fetched.
    ///
    /// The timestamp is truncated to microseconds, the precision PostgreSQL
    /// stores, so a persisted record reads back equal to the fetched one.
    pub fn new(crsid: Crsid, profile: PersonProfile, last_updated: DateTime<Utc>) -> Self {
        let PersonProfile {
            display_name,
            registered_name,
            surname,
            institution,
            college,
            status,
        } = profile;
        Self {
            crsid,
            display_name,
            registered_name,
            surname,
            institution,
            college,
            status,
            last_updated: last_updated.trunc_subsecs(6),
        }
    }

    /// Directory identifier.
    pub fn crsid(&self) -> &Crsid {
        &self.crsid
    }

    /// Name shown in the directory.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Name as registered with the university.
    pub fn registered_name(&self) -> &str {
        &self.registered_name
    }

    /// Family name.
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Department or institution.
    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// College affiliation; empty when none is listed.
    pub fn college(&self) -> &str {
        &self.college
    }

    /// Membership status, such as `staff` or `student`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// When the record was fetched from the directory.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Split the record back into its identifier, profile and timestamp.
    pub fn into_parts(self) -> (Crsid, PersonProfile, DateTime<Utc>) {
        let profile = PersonProfile {
            display_name: self.display_name,
            registered_name: self.registered_name,
            surname: self.surname,
            institution: self.institution,
            college: self.college,
            status: self.status,
        };
        (self.crsid, profile, self.last_updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("ab123", "ab123")]
    #[case("  AB123\n", "ab123")]
    #[case("Spqr1", "spqr1")]
    fn crsid_normalises_input(#[case] raw: &str, #[case] expected: &str) {
        let crsid = Crsid::new(raw).expect("valid crsid");
        assert_eq!(crsid.as_ref(), expected);
    }

    #[rstest]
    #[case("", CrsidValidationError::Empty)]
    #[case("   ", CrsidValidationError::Empty)]
    #[case("ab 123", CrsidValidationError::InvalidCharacters)]
    #[case("../etc", CrsidValidationError::InvalidCharacters)]
    #[case("abcdefghijklmnopq", CrsidValidationError::TooLong { max: CRSID_MAX })]
    fn crsid_rejects_invalid_input(#[case] raw: &str, #[case] expected: CrsidValidationError) {
        assert_eq!(Crsid::new(raw), Err(expected));
    }

    #[rstest]
    fn person_serialises_with_directory_keys() {
        let crsid = Crsid::new("ab123").expect("valid crsid");
        let profile = PersonProfile {
            display_name: "Jane Doe".into(),
            registered_name: "J. Doe".into(),
            surname: "Doe".into(),
            institution: "Computer Laboratory".into(),
            college: "King's College".into(),
            status: "staff".into(),
        };
        let fetched_at = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let person = Person::new(crsid, profile, fetched_at);

        let value = serde_json::to_value(&person).expect("serialise");
        assert_eq!(
            value,
            json!({
                "CRSID": "ab123",
                "DisplayName": "Jane Doe",
                "RegisteredName": "J. Doe",
                "Surname": "Doe",
                "Institution": "Computer Laboratory",
                "College": "King's College",
                "Status": "staff",
                "LastUpdated": "2024-03-01T12:00:00Z",
            })
        );

        let decoded: Person = serde_json::from_value(value).expect("deserialise");
        assert_eq!(decoded, person);
    }

    #[rstest]
    fn fetch_time_is_truncated_to_microseconds() {
        let crsid = Crsid::new("ab123").expect("valid crsid");
        let fetched_at = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
            + chrono::Duration::nanoseconds(964_128_427);

        let person = Person::new(crsid, PersonProfile::default(), fetched_at);

        assert_eq!(person.last_updated().timestamp_subsec_nanos(), 964_128_000);
    }

    #[rstest]
    fn deserialising_rejects_invalid_identifier() {
        let value = json!({
            "CRSID": "not valid",
            "DisplayName": "",
            "RegisteredName": "",
            "Surname": "",
            "Institution": "",
            "College": "",
            "Status": "",
            "LastUpdated": "2024-03-01T12:00:00Z",
        });
        assert!(serde_json::from_value::<Person>(value).is_err());
    }
}
