//! Extraction of person fields from a directory profile page.
//!
//! The profile lists identifiers as table rows: the first cell holds the
//! label in a `<strong>` element and the second holds the value, usually
//! wrapped as `Value: <text> Visibility: <scope>`.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::PersonProfile;

static ROW_SELECTOR: OnceLock<Selector> = OnceLock::new();
static LABEL_SELECTOR: OnceLock<Selector> = OnceLock::new();
static CELL_SELECTOR: OnceLock<Selector> = OnceLock::new();
static VALUE_RE: OnceLock<Regex> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| {
        Selector::parse(css)
            .unwrap_or_else(|error| panic!("selector `{css}` failed to parse: {error}"))
    })
}

fn value_regex() -> &'static Regex {
    VALUE_RE.get_or_init(|| {
        Regex::new(r"(?s)\s*Value:\s+(.*)\s+Visibility.*")
            .unwrap_or_else(|error| panic!("profile value regex failed to compile: {error}"))
    })
}

fn field<'a>(profile: &'a mut PersonProfile, label: &str) -> Option<&'a mut String> {
    match label {
        "Display name:" => Some(&mut profile.display_name),
        "Registered name:" => Some(&mut profile.registered_name),
        "Surname:" => Some(&mut profile.surname),
        "MIS status:" => Some(&mut profile.status),
        "UCS registered institution:" => Some(&mut profile.institution),
        "College:" => Some(&mut profile.college),
        _ => None,
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Strip the `Value: ... Visibility` wrapper from a raw cell value.
pub(crate) fn clean_value(raw: &str) -> String {
    value_regex()
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map_or(raw, |value| value.as_str())
        .trim()
        .to_owned()
}

/// Parse a profile page into its known fields.
///
/// Unknown labels are ignored and absent labels leave their field empty.
pub fn parse_person_profile(html: &str) -> PersonProfile {
    let document = Html::parse_document(html);
    let mut profile = PersonProfile::default();

    for row in document.select(selector(&ROW_SELECTOR, ".listing.identifiers tr")) {
        let label = row
            .select(selector(&LABEL_SELECTOR, "td strong"))
            .map(element_text)
            .collect::<String>();
        let Some(slot) = field(&mut profile, label.trim()) else {
            continue;
        };
        if let Some(cell) = row.select(selector(&CELL_SELECTOR, "td")).nth(1) {
            *slot = clean_value(&element_text(cell));
        }
    }

    profile
}
