//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `--flags`, `CALC_*` environment variables or a config
//! file. The database URL additionally falls back to the conventional
//! `DATABASE_URL` variable.

use std::env;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Bind address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
/// Upper bound on pooled database connections when none is configured.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Failure to resolve a required setting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("no database URL configured; set CALC_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALC")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl AppSettings {
    /// Configured database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        self.database_url
            .clone()
            .or_else(|| env::var("DATABASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Configured bind address or [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured pool size, never below one.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.max(1)
    }
}
