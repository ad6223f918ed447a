//! Server entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use chirp::inbound::http::health::HealthState;
use chirp::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use chirp::settings::ChirpSettings;

use server::{ServerConfig, create_server};

async fn connect_storage(
    settings: &ChirpSettings,
    database_url: &str,
) -> std::io::Result<DbPool> {
    if settings.run_migrations {
        run_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
    }
    let pool_config =
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    info!(max_connections = settings.db_max_connections(), "database pool ready");
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ChirpSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let jwt_secret = settings.jwt_secret().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, jwt_secret)
        .with_token_ttl(settings.token_ttl())
        .with_bcrypt_cost(settings.bcrypt_cost().map_err(std::io::Error::other)?)
        .with_cors_allowed_origins(settings.cors_allowed_origins());
    if let Some(database_url) = settings.database_url.as_deref() {
        let pool = connect_storage(&settings, database_url).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &config)?;
    server.await
}
