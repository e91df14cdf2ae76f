use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a DNS request, used to pick the downstream handler and the
/// frequency table a query name is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Internal,
    External,
}

impl Classification {
    pub const ALL: [Classification; 2] = [Classification::Internal, Classification::External];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Internal => "internal",
            Classification::External => "external",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
