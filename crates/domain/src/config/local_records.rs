use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Static record answered by the internal handler
///
/// The record type follows the address family: IPv4 answers `A`, IPv6
/// answers `AAAA`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalDnsRecord {
    /// Fully qualified name (e.g., "db.service.bosh.")
    pub name: String,

    pub ip: IpAddr,

    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

fn default_ttl() -> u32 {
    300
}
