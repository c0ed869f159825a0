//! Application configuration.
//!
//! Values come from an optional TOML file plus `RECONCILER__`-prefixed
//! environment variables, environment winning.

use reconciler_env::logger::LogConfig;

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: Server,
    pub gateway: Gateway,
    pub log: LogConfig,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Gateway {
    /// Base URL of the storefront, used for the default post-payment
    /// redirect.
    pub base_url: String,
}

impl Default for Gateway {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

impl Settings {
    /// Load settings from `config/reconciler.toml` (if present) and the
    /// environment.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config_path(None)
    }

    pub fn with_config_path(explicit_path: Option<std::path::PathBuf>) -> Result<Self, ConfigError> {
        let file = explicit_path
            .unwrap_or_else(|| std::path::PathBuf::from("config/reconciler.toml"));

        let settings = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("RECONCILER")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid("server host must not be empty"));
        }
        if self.gateway.base_url.is_empty() {
            return Err(ConfigError::Invalid("gateway base_url must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 8080);
    }
}
