//! Application settings loaded via OrthoConfig, plus the server configuration
//! built from them.
//!
//! Every setting can come from a `--flag`, a `POKEPC_*` environment variable
//! or a configuration file. Unset values fall back to the defaults below.

use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::session::SessionCookieConfig;
use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::password::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Errors raised when settings hold unusable values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("bind_addr `{value}` is not a socket address")]
    BindAddr { value: String },
    #[error("session_backend must be `memory` or `database`, got `{value}`")]
    SessionBackend { value: String },
    #[error("session_ttl_minutes must be positive, got {value}")]
    SessionTtl { value: i64 },
    #[error("bcrypt_cost must be between 4 and 31, got {value}")]
    BcryptCost { value: u32 },
    #[error("db_max_connections must be positive")]
    PoolSize,
    #[error("session_backend `database` requires database_url")]
    DatabaseSessionsWithoutDatabase,
}

/// Where login sessions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// Process-local map; sessions vanish on restart.
    Memory,
    /// The `sessions` table.
    Database,
}

/// Settings controlling the server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POKEPC")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory adapters are used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations at startup.
    pub run_migrations: Option<bool>,
    /// `memory` or `database`.
    pub session_backend: Option<String>,
    /// Lifetime of a login session in minutes.
    pub session_ttl_minutes: Option<i64>,
    /// Emit the `Secure` cookie attribute.
    pub cookie_secure: Option<bool>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| ConfigError::BindAddr {
            value: raw.to_owned(),
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn db_max_connections(&self) -> Result<u32, ConfigError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(ConfigError::PoolSize),
            size => Ok(size),
        }
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn session_backend(&self) -> Result<SessionBackend, ConfigError> {
        let backend = match self.session_backend.as_deref().map(str::trim) {
            None => SessionBackend::Memory,
            Some(raw) if raw.eq_ignore_ascii_case("memory") => SessionBackend::Memory,
            Some(raw) if raw.eq_ignore_ascii_case("database") => SessionBackend::Database,
            Some(raw) => {
                return Err(ConfigError::SessionBackend {
                    value: raw.to_owned(),
                });
            }
        };
        if backend == SessionBackend::Database && self.database_url().is_none() {
            return Err(ConfigError::DatabaseSessionsWithoutDatabase);
        }
        Ok(backend)
    }

    pub fn session_ttl(&self) -> Result<Duration, ConfigError> {
        let minutes = self
            .session_ttl_minutes
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
        if minutes <= 0 {
            return Err(ConfigError::SessionTtl { value: minutes });
        }
        Ok(Duration::minutes(minutes))
    }

    pub fn cookie(&self) -> SessionCookieConfig {
        SessionCookieConfig {
            secure: self.cookie_secure.unwrap_or(true),
        }
    }

    pub fn bcrypt_cost(&self) -> Result<u32, ConfigError> {
        let cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(ConfigError::BcryptCost { value: cost });
        }
        Ok(cost)
    }
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cookie: SessionCookieConfig,
    pub(crate) ports: HttpStatePorts,
}

impl ServerConfig {
    /// Bundle the listen address, cookie attributes and wired ports.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, cookie: SessionCookieConfig, ports: HttpStatePorts) -> Self {
        Self {
            bind_addr,
            cookie,
            ports,
        }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
