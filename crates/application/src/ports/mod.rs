pub mod clock;
pub mod dns_handler;
pub mod request_counter;
pub mod snapshot_store;

pub use clock::{Clock, SystemClock};
pub use dns_handler::{DnsHandler, ResponseWriter};
pub use request_counter::RequestCounter;
pub use snapshot_store::SnapshotStore;
