pub mod dispatcher;
pub mod frequency_store;
pub mod snapshot_scheduler;

pub use dispatcher::Dispatcher;
pub use frequency_store::{FrequencyStore, FrequencyTable};
pub use snapshot_scheduler::{SnapshotOutcome, SnapshotScheduler};
