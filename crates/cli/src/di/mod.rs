use anyhow::Context;
use dnsprofiler_application::services::{Dispatcher, FrequencyStore, SnapshotScheduler};
use dnsprofiler_domain::Config;
use dnsprofiler_infrastructure::dns::{ForwardingHandler, LocalRecordsHandler, SuffixClassifier};
use dnsprofiler_infrastructure::metrics::RequestCounters;
use dnsprofiler_infrastructure::snapshot::FileSnapshotStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Long-lived objects shared by the DNS listener and the metrics endpoint.
pub struct Services {
    pub dispatcher: Arc<Dispatcher>,
    pub classifier: Arc<SuffixClassifier>,
    pub counters: Arc<RequestCounters>,
}

impl Services {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let artifacts = FileSnapshotStore::new(&config.profiling.directory);
        artifacts.ensure_directory().await?;

        let frequencies = Arc::new(FrequencyStore::new());
        let counters = Arc::new(RequestCounters::new());
        let scheduler = SnapshotScheduler::new(
            frequencies.clone(),
            Arc::new(artifacts),
            config.profiling.prefix.clone(),
            config.profiling.max_levels,
        );

        let mut dispatcher = Dispatcher::new(frequencies, scheduler, counters.clone());

        if config.local_records.is_empty() {
            warn!("No local records configured, internal requests will not be answered");
        } else {
            info!(records = config.local_records.len(), "Internal handler: local records");
            dispatcher = dispatcher
                .with_internal_handler(Arc::new(LocalRecordsHandler::new(&config.local_records)));
        }

        match config.upstream.servers.first() {
            Some(server) => {
                let upstream: SocketAddr = server
                    .parse()
                    .with_context(|| format!("invalid upstream server '{}'", server))?;
                info!(%upstream, "External handler: forwarding");
                dispatcher = dispatcher.with_external_handler(Arc::new(ForwardingHandler::new(
                    upstream,
                    Duration::from_millis(config.upstream.timeout_ms),
                )));
            }
            None => {
                warn!("No upstream configured, external requests will not be answered");
            }
        }

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            classifier: Arc::new(SuffixClassifier::from_config(&config.classification)),
            counters,
        })
    }
}
