use super::{
    ClassificationConfig, ConfigError, LocalDnsRecord, LoggingConfig, ProfilingConfig,
    ServerConfig, UpstreamConfig,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "dnsprofiler.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub profiling: ProfilingConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub local_records: Vec<LocalDnsRecord>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub bind_address: Option<String>,
    pub snapshot_dir: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads `config_path`, falling back to `dnsprofiler.toml` in the working
    /// directory and then to built-in defaults, and applies `overrides`.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.metrics_port {
            self.server.metrics_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(dir) = overrides.snapshot_dir {
            self.profiling.directory = dir.into();
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("server.dns_port must be non-zero".into()));
        }
        if self.server.metrics_port == 0 {
            return Err(ConfigError::Validation(
                "server.metrics_port must be non-zero".into(),
            ));
        }
        self.server.bind_ip()?;
        if self.profiling.max_levels == 0 {
            return Err(ConfigError::Validation(
                "profiling.max_levels must be at least 1".into(),
            ));
        }
        let prefix = &self.profiling.prefix;
        if prefix.is_empty() || prefix.contains('/') || prefix.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "profiling.prefix '{}' must be a non-empty file name prefix",
                prefix
            )));
        }
        for server in &self.upstream.servers {
            server.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!("upstream server '{}': {}", server, e))
            })?;
        }
        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.timeout_ms must be non-zero".into(),
            ));
        }
        for record in &self.local_records {
            if record.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "local_records entries need a name".into(),
                ));
            }
        }
        Ok(())
    }
}
