use serde::{Deserialize, Serialize};

/// Resolvers that external requests are forwarded to
///
/// An empty `servers` list leaves the external side unwired: external
/// requests are then neither answered nor counted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub servers: Vec<String>,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}
