//! Domain primitives, services and ports.
//!
//! Purpose: define the directory record, the shared session and credential
//! services and the lookup orchestrator without depending on any transport or
//! storage technology. Adapters plug in through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic failure payload.
//! - Person / Crsid: directory record and its identifier.
//! - SessionToken: shared directory session.
//! - CredentialStore, SessionManager, PersonLookupService: domain services.

pub mod credential_store;
pub mod credentials;
pub mod error;
pub mod person;
pub mod person_lookup_service;
pub mod ports;
pub mod session_manager;
pub mod session_token;
pub mod trace_id;

pub use self::credential_store::CredentialStore;
pub use self::credentials::{ConfigEntry, ConfigKey, DirectoryCredentials, UnknownConfigKey};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::person::{CRSID_MAX, Crsid, CrsidValidationError, Person, PersonProfile};
pub use self::person_lookup_service::{MAX_FETCH_ATTEMPTS, PersonLookupService};
pub use self::session_manager::SessionManager;
pub use self::session_token::SessionToken;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use lookup_proxy::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing credentials"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
