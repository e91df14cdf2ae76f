//! Configuration module for dnsprofiler
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener ports and binding
//! - `profiling`: Snapshot artifacts and ranking depth
//! - `classification`: Internal/external request split
//! - `upstream`: Forwarding target for external requests
//! - `local_records`: Static answers for internal requests
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod classification;
pub mod errors;
pub mod local_records;
pub mod logging;
pub mod profiling;
pub mod root;
pub mod server;
pub mod upstream;

pub use classification::ClassificationConfig;
pub use errors::ConfigError;
pub use local_records::LocalDnsRecord;
pub use logging::{LogFormat, LoggingConfig};
pub use profiling::ProfilingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
