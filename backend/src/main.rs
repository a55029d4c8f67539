//! Backend entry-point: loads settings, prepares the database and serves the
//! device REST API.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use device_service::domain::DeviceService;
use device_service::inbound::http::health::HealthState;
use device_service::inbound::http::state::HttpState;
use device_service::outbound::persistence::{DbPool, DieselDeviceRepository, run_pending_migrations};
use device_service::server::{ServerConfig, create_server};
use device_service::settings::Settings;

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

    let settings = Settings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.server.bind_addr().map_err(std::io::Error::other)?;
    let pool_config = settings
        .database
        .pool_config()
        .map_err(std::io::Error::other)?;

    let database_url = pool_config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema ready");

    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    info!(
        host = settings.database.host(),
        database = settings.database.name(),
        "database pool ready"
    );

    let service = Arc::new(DeviceService::new(
        Arc::new(DieselDeviceRepository::new(pool)),
        Arc::new(DefaultClock),
    ));
    let http_state = web::Data::new(HttpState::new(service.clone(), service));
    let health_state = web::Data::new(HealthState::new());

    let server_config = ServerConfig::new(bind_addr).with_workers(settings.server.workers);
    let server = create_server(health_state.clone(), http_state, server_config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
