use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::tls::TlsConfig;
use super::upstream::DohConfig;
use crate::trust_policy::TrustPolicy;

const LOCAL_CONFIG_PATH: &str = "doh-relay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/doh-relay/config.toml";

/// Main configuration structure, loaded once at startup and never mutated
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// UDP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream DoH servers and request settings
    #[serde(default)]
    pub doh: DohConfig,

    /// Upstream certificate trust checks
    #[serde(default)]
    pub tls: TlsConfig,

    /// Process log level and query log target
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-relay.toml in current directory
    /// 3. /etc/doh-relay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.listen.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid listen address '{}': {}",
                self.server.listen, e
            ))
        })
    }

    pub fn trust_policy(&self) -> TrustPolicy {
        TrustPolicy::from_config(&self.tls)
    }

    /// Validate configuration, including the upstream trust policy
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;

        if self.doh.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No DoH servers configured".to_string(),
            ));
        }

        for server in &self.doh.servers {
            if server.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "DoH server '{}' has no name",
                    server.url
                )));
            }
            if !server.url.starts_with("https://") && !server.url.starts_with("http://") {
                return Err(ConfigError::Validation(format!(
                    "DoH server '{}' has an invalid URL: {}",
                    server.name, server.url
                )));
            }
        }

        if self.doh.timeout == 0 {
            return Err(ConfigError::Validation(
                "DoH timeout must be greater than 0".to_string(),
            ));
        }

        self.trust_policy().validate()
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub listen: Option<String>,
    pub log_level: Option<String>,
}
