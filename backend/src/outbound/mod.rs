//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **lookup**: reqwest clients for the staff directory and its identity
//!   provider, plus the profile page parser
//! - **cache**: in-process record cache
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **config**: in-memory configuration store used without a database
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod config;
pub mod lookup;
pub mod persistence;
