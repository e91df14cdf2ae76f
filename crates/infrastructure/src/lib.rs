pub mod dns;
pub mod metrics;
pub mod snapshot;
