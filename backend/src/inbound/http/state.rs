//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only depend on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CredentialSource, PersonLookup};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub lookup: Arc<dyn PersonLookup>,
    pub credentials: Arc<dyn CredentialSource>,
}

impl HttpState {
    /// Bundle the ports handlers depend on.
    pub fn new(lookup: Arc<dyn PersonLookup>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            lookup,
            credentials,
        }
    }
}
