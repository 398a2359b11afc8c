use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

/// Settings for the external token-issuing collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub endpoint: String,
    pub service_key: String,
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with NAVIRITI_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with NAVIRITI_)
            // e.g., NAVIRITI_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NAVIRITI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NAVIRITI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known single-underscore environment overrides.
///
/// `DATABASE_URL` is the conventional deployment variable and takes
/// precedence over the file value; the auth collaborator settings follow
/// the same pattern so secrets never need to live in config files.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("NAVIRITI_DATABASE__URL"))
        .ok();

    let auth_endpoint = env::var("NAVIRITI_AUTH__ENDPOINT").ok();
    let auth_service_key = env::var("NAVIRITI_AUTH__SERVICE_KEY").ok();
    let auth_jwt_secret = env::var("NAVIRITI_AUTH__JWT_SECRET").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = database_url {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(endpoint) = auth_endpoint {
        builder = builder.set_override("auth.endpoint", endpoint)?;
    }
    if let Some(service_key) = auth_service_key {
        builder = builder.set_override("auth.service_key", service_key)?;
    }
    if let Some(jwt_secret) = auth_jwt_secret {
        builder = builder.set_override("auth.jwt_secret", jwt_secret)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_logging_defaults_apply_on_empty_section() {
        let logging: LoggingSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
