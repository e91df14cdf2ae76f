use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Port of the Prometheus text endpoint
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_dns_port() -> u16 {
    53
}

fn default_metrics_port() -> u16 {
    9153
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

impl ServerConfig {
    /// Parses `bind_address` as a bare IP, v4 or v6 (`::` included).
    pub fn bind_ip(&self) -> Result<IpAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "server.bind_address '{}': {}",
                self.bind_address, e
            ))
        })
    }

    pub fn dns_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.bind_ip()?, self.dns_port))
    }

    pub fn metrics_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.bind_ip()?, self.metrics_port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            metrics_port: default_metrics_port(),
            bind_address: default_bind_address(),
        }
    }
}
