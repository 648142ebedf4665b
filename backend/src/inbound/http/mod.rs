//! HTTP inbound adapter: the person lookup API, the configuration form and
//! health probes.

pub mod auth;
pub mod configure;
pub mod error;
pub mod health;
pub mod home;
pub mod people;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
