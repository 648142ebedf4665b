//! Driven port for fetching profile pages from the staff directory.
//!
//! `AuthRequired` is kept distinct from every other failure because it is the
//! only signal that drives a session refresh and retry.

use async_trait::async_trait;

use crate::domain::{Crsid, Person, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while querying the directory.
    pub enum DirectorySourceError {
        /// The directory bounced the request to the identity provider.
        AuthRequired => "directory session expired; login required",
        /// The directory has no entry for the identifier.
        NotFound { crsid: String } => "Person was not found: {crsid}",
        /// The directory answered with an unexpected status.
        UpstreamStatus { status: u16 } =>
            "directory returned unexpected status {status}",
        /// Network transport failed, including while reading the body.
        Transport { message: String } => "directory transport failed: {message}",
        /// The request or the body read exceeded its deadline.
        Timeout { message: String } => "directory timeout: {message}",
    }
}

/// Port for resolving one identifier against the directory.
///
/// Implementations must not touch the cache or the session state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetch and parse the profile page for `crsid` using `token`.
    async fn fetch_person(
        &self,
        crsid: &Crsid,
        token: &SessionToken,
    ) -> Result<Person, DirectorySourceError>;
}
