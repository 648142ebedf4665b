//! Adapters for the staff directory and its single-sign-on login.

mod http_source;
mod login;
mod profile_parser;

pub use http_source::DirectoryHttpSource;
pub use login::IdentityProviderHttpLogin;
pub use profile_parser::parse_person_profile;

use reqwest::Url;

/// Cookie carrying the directory session.
pub(crate) const SESSION_COOKIE: &str = "JSESSIONID";

/// Whether both URLs point at the same host.
///
/// Schemes are ignored. Ports only have to agree when both URLs spell one
/// out, so `http://idp` and `https://idp:8443` count as the same host.
pub(crate) fn same_host(left: &Url, right: &Url) -> bool {
    let ports_agree = match (left.port(), right.port()) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };
    left.host_str().is_some() && left.host_str() == right.host_str() && ports_agree
}
