use super::wire::{decode, encode, reply_to, MAX_UDP_MESSAGE_SIZE};
use async_trait::async_trait;
use dnsprofiler_application::ports::{DnsHandler, ResponseWriter};
use dnsprofiler_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Relays external requests verbatim to an upstream resolver over UDP.
///
/// Upstream failures are answered with SERVFAIL.
pub struct ForwardingHandler {
    upstream: SocketAddr,
    timeout: Duration,
}

impl ForwardingHandler {
    pub fn new(upstream: SocketAddr, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }

    async fn exchange(&self, message: &Message) -> Result<Message, DomainError> {
        let query_bytes = encode(message)?;

        let bind_addr: SocketAddr = if self.upstream.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
        socket.connect(self.upstream).await.map_err(|e| {
            DomainError::UpstreamError(format!("Failed to connect to {}: {}", self.upstream, e))
        })?;

        socket.send(&query_bytes).await.map_err(|e| {
            DomainError::UpstreamError(format!("Failed to send query to {}: {}", self.upstream, e))
        })?;

        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];
        let bytes_received = tokio::time::timeout(self.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| {
                DomainError::UpstreamError(format!(
                    "Timeout waiting for response from {}",
                    self.upstream
                ))
            })?
            .map_err(|e| {
                DomainError::UpstreamError(format!(
                    "Failed to receive response from {}: {}",
                    self.upstream, e
                ))
            })?;

        let reply = decode(&recv_buf[..bytes_received])?;
        if reply.id() != message.id() {
            return Err(DomainError::UpstreamError(format!(
                "Response id {} from {} does not match query id {}",
                reply.id(),
                self.upstream,
                message.id()
            )));
        }

        debug!(
            server = %self.upstream,
            bytes_received,
            "Upstream response received"
        );
        Ok(reply)
    }
}

#[async_trait]
impl DnsHandler for ForwardingHandler {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, message: &Message) {
        let response = match self.exchange(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(server = %self.upstream, error = %e, "Forwarding failed");
                reply_to(message, ResponseCode::ServFail)
            }
        };

        if let Err(e) = writer.write_msg(&response).await {
            warn!(error = %e, "Failed to write forwarded answer");
        }
    }
}
