use async_trait::async_trait;
use dnsprofiler_domain::DomainError;
use hickory_proto::op::Message;

/// Sink for the reply to a single DNS request.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError>;
}

/// Downstream request handler the dispatcher forwards to.
///
/// The message is handed over verbatim. Handlers own their failure
/// reporting: whatever goes wrong is answered through `writer` or logged,
/// never returned to the dispatcher.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, message: &Message);
}
