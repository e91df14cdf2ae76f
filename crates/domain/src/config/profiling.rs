use crate::frequency::DEFAULT_MAX_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hourly "top queried names" snapshot settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfilingConfig {
    /// Directory the snapshot artifacts are written to (default: "/tmp")
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Artifact name prefix (default: "dnsprofiler")
    /// Files are named `<prefix>_top_<classification>_requests_<YYYY-MM-DD-HH>.txt`
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Distinct count levels kept per snapshot (default: 100)
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            prefix: default_prefix(),
            max_levels: default_max_levels(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("/tmp")
}

fn default_prefix() -> String {
    "dnsprofiler".to_string()
}

fn default_max_levels() -> usize {
    DEFAULT_MAX_LEVELS
}
