use crate::ports::{Clock, DnsHandler, RequestCounter, ResponseWriter, SystemClock};
use crate::services::{FrequencyStore, SnapshotScheduler};
use dnsprofiler_domain::{Classification, DomainError};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::debug;

/// Routes classified requests to the internal or external handler while
/// profiling query names.
///
/// Either handler may be absent; requests of that classification are then
/// dropped without counting and without an error.
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(store, scheduler, counters)
///     .with_internal_handler(local_records)
///     .with_external_handler(forwarder);
///
/// dispatcher.handle(Some(Classification::External), &mut writer, &message).await?;
/// ```
pub struct Dispatcher {
    internal_handler: Option<Arc<dyn DnsHandler>>,
    external_handler: Option<Arc<dyn DnsHandler>>,
    counters: Arc<dyn RequestCounter>,
    store: Arc<FrequencyStore>,
    scheduler: SnapshotScheduler,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<FrequencyStore>,
        scheduler: SnapshotScheduler,
        counters: Arc<dyn RequestCounter>,
    ) -> Self {
        Self {
            internal_handler: None,
            external_handler: None,
            counters,
            store,
            scheduler,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_internal_handler(mut self, handler: Arc<dyn DnsHandler>) -> Self {
        self.internal_handler = Some(handler);
        self
    }

    pub fn with_external_handler(mut self, handler: Arc<dyn DnsHandler>) -> Self {
        self.external_handler = Some(handler);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Dispatches `message` and then opportunistically produces the hourly
    /// snapshot.
    ///
    /// Fails with [`DomainError::MissingClassification`] when `classification`
    /// is `None`; nothing is forwarded or counted and no snapshot check runs.
    /// Snapshot problems never fail the request.
    pub async fn handle(
        &self,
        classification: Option<Classification>,
        writer: &mut dyn ResponseWriter,
        message: &Message,
    ) -> Result<ResponseCode, DomainError> {
        let classification = classification.ok_or(DomainError::MissingClassification)?;

        self.dispatch(classification, writer, message).await;
        self.scheduler.maybe_snapshot(&self.clock.now()).await;

        Ok(ResponseCode::NoError)
    }

    async fn dispatch(
        &self,
        classification: Classification,
        writer: &mut dyn ResponseWriter,
        message: &Message,
    ) {
        let handler = match classification {
            Classification::Internal => self.internal_handler.as_ref(),
            Classification::External => self.external_handler.as_ref(),
        };
        let Some(handler) = handler else {
            debug!(%classification, "No handler configured, request dropped");
            return;
        };

        let names: Vec<String> = message
            .queries()
            .iter()
            .map(|query| query.name().to_string())
            .collect();
        self.store.increment_all(classification, &names);

        handler.serve_dns(writer, message).await;

        match classification {
            Classification::Internal => self.counters.increment_internal_counter(),
            Classification::External => self.counters.increment_external_counter(),
        }
    }
}
