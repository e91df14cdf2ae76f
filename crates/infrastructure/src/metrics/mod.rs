pub mod request_counters;

pub use request_counters::RequestCounters;
