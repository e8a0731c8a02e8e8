//! Backend entry-point: loads settings, wires adapters and serves HTTP.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pokepc::inbound::http::health::HealthState;
use pokepc::inbound::http::state::HttpStatePorts;
use pokepc::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pokepc::server::{
    AppSettings, ServerConfig, ServiceSettings, build_diesel_ports, build_memory_ports,
    create_server,
};

fn startup_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

async fn build_ports(settings: &AppSettings) -> std::io::Result<HttpStatePorts> {
    let service_settings = ServiceSettings {
        bcrypt_cost: settings
            .bcrypt_cost()
            .map_err(|e| startup_error("invalid settings", e))?,
        session_ttl: settings
            .session_ttl()
            .map_err(|e| startup_error("invalid settings", e))?,
    };
    let session_backend = settings
        .session_backend()
        .map_err(|e| startup_error("invalid settings", e))?;

    let Some(database_url) = settings.database_url() else {
        warn!("no database_url configured; using in-memory adapters");
        return build_memory_ports(service_settings)
            .map_err(|e| startup_error("reference data", e));
    };

    if settings.run_migrations() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(|e| startup_error("migrations failed", e))?;
        info!(applied, "database schema up to date");
    }

    let max_size = settings
        .db_max_connections()
        .map_err(|e| startup_error("invalid settings", e))?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(|e| startup_error("database pool", e))?;
    info!(max_size, ?session_backend, "connected to PostgreSQL");
    Ok(build_diesel_ports(&pool, session_backend, service_settings))
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

    let settings = AppSettings::load().map_err(|e| startup_error("loading settings", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("invalid settings", e))?;
    let ports = build_ports(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, settings.cookie(), ports),
    )?;
    health_state.mark_ready();
    info!(%bind_addr, "PokePC listening");
    server.await
}

#[cfg(test)]
mod tests {
    //! Startup wiring without a database.
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;

    #[actix_web::test]
    async fn settings_without_database_wire_memory_ports() {
        let _guard = lock_env(vec![
            ("POKEPC_DATABASE_URL", None::<String>),
            ("POKEPC_SESSION_BACKEND", None),
        ]);
        let settings =
            AppSettings::load_from_iter([OsString::from("pokepc")]).expect("settings load");

        assert!(settings.database_url().is_none());
        build_ports(&settings).await.expect("in-memory ports");
    }
}
