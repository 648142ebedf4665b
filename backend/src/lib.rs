//! Caching proxy that exposes the University of Cambridge lookup directory
//! as a JSON API, logging in through the identity provider on demand.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(test)]
mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
