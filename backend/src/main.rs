//! Matrimony server entry-point: loads settings, picks adapters and serves
//! the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use matrimony::config::AppSettings;
use matrimony::inbound::http::health::HealthState;
use matrimony::inbound::http::session_config::{BuildMode, session_settings_from_env};
use matrimony::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, WebhookTarget, create_server};

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn connect_database(database_url: String) -> std::io::Result<DbPool> {
    let migrate_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migrate_url))
        .await
        .map_err(|err| io_error("migration task", err))?
        .map_err(|err| io_error("migrations", err))?;
    info!(applied, "database schema up to date");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| io_error("database pool", err))
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

    let settings = AppSettings::load().map_err(|err| io_error("settings", err))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| io_error("session settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io_error("settings", err))?;

    let mut config = ServerConfig::new(session, bind_addr)
        .with_payment_settings(settings.payment_settings())
        .with_confirmation_phone(settings.confirmation_phone());

    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url).await?);
    }
    if let Some(identity) = settings
        .identity_service()
        .map_err(|err| io_error("settings", err))?
    {
        info!(base_url = %identity.base_url, "using remote identity service");
        config = config.with_identity_service(identity);
    }
    if let Some(endpoint) = settings
        .webhook_endpoint()
        .map_err(|err| io_error("settings", err))?
    {
        config = config.with_webhook(WebhookTarget {
            endpoint,
            timeout: settings.webhook_timeout(),
        });
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
