//! dnsprofiler Domain Layer
pub mod bucket;
pub mod classification;
pub mod config;
pub mod errors;
pub mod frequency;

pub use bucket::BucketKey;
pub use classification::Classification;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use frequency::{FrequencyLevel, DEFAULT_MAX_LEVELS};
