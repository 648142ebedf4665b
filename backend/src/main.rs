//! Lookup proxy entry point: loads settings, prepares persistence and runs
//! the HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lookup_proxy::inbound::http::health::HealthState;
use lookup_proxy::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, UpstreamConfig, create_server};

fn settings_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("invalid settings: {err}"))
}

async fn connect_database(database_url: &str) -> std::io::Result<DbPool> {
    run_pending_migrations(database_url.to_owned())
        .await
        .map_err(std::io::Error::other)?;
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(settings_error)?;
    let bind_addr = settings.bind_addr().map_err(settings_error)?;
    let upstream = UpstreamConfig {
        directory_base_url: settings.directory_base_url().map_err(settings_error)?,
        login_url: settings.login_url().map_err(settings_error)?,
        timeout: settings.upstream_timeout(),
    };

    let mut config = ServerConfig::new(bind_addr, upstream);
    match settings.database_url() {
        Some(url) => {
            config = config.with_db_pool(connect_database(url).await?);
            info!("using PostgreSQL persistence");
        }
        None => {
            warn!("no database configured; records and configuration are kept in memory");
            config = config.with_config_seeds(settings.config_seeds());
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "lookup proxy listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
