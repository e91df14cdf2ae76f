pub mod classifier;
pub mod forwarder;
pub mod local_records;
pub mod server;
pub mod wire;

pub use classifier::SuffixClassifier;
pub use forwarder::ForwardingHandler;
pub use local_records::LocalRecordsHandler;
pub use server::{UdpDnsServer, UdpResponseWriter};
