use serde::{Deserialize, Serialize};

/// Splits incoming requests into internal and external traffic
///
/// A request whose first question ends with one of `internal_domains`
/// (case-insensitive, label aligned) is internal; everything else is external.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub internal_domains: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            internal_domains: vec!["bosh.".to_string()],
        }
    }
}
