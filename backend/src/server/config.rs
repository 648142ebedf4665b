//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use lookup_proxy::domain::ConfigKey;
use lookup_proxy::outbound::persistence::DbPool;
use url::Url;

/// Endpoints and limits for the directory and its identity provider.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub directory_base_url: Url,
    pub login_url: Url,
    pub timeout: Duration,
}

/// Everything `create_server` needs to wire adapters and bind the listener.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: UpstreamConfig,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) config_seeds: Vec<(ConfigKey, String)>,
}

impl ServerConfig {
    #[must_use]
    /// Configuration with no database and no seeded values.
    pub fn new(bind_addr: SocketAddr, upstream: UpstreamConfig) -> Self {
        Self {
            bind_addr,
            upstream,
            db_pool: None,
            config_seeds: Vec::new(),
        }
    }

    /// Persist records and configuration in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Values preloaded into the in-memory configuration store.
    ///
    /// Ignored when a database pool is attached.
    #[must_use]
    pub fn with_config_seeds(mut self, seeds: Vec<(ConfigKey, String)>) -> Self {
        self.config_seeds = seeds;
        self
    }
}
