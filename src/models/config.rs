use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::types::Locale;

/// Configuration options for the marketplace server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Cookie signing key material, at least 64 bytes.
    pub secret: String,
    /// Glob of the Tera templates.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub static_dir: String,
    /// Locale used when a request does not carry one.
    #[serde(default)]
    pub default_locale: Locale,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, then `config/{APP_ENV}.yaml` when present,
    /// then `APP__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
