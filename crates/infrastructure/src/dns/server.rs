use super::classifier::SuffixClassifier;
use super::wire::{decode, encode, MAX_UDP_MESSAGE_SIZE};
use async_trait::async_trait;
use dnsprofiler_application::ports::ResponseWriter;
use dnsprofiler_application::services::Dispatcher;
use dnsprofiler_domain::DomainError;
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, info};

/// Writes the reply back to the datagram's sender.
pub struct UdpResponseWriter {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl UdpResponseWriter {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr) -> Self {
        Self { socket, peer }
    }
}

#[async_trait]
impl ResponseWriter for UdpResponseWriter {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError> {
        let bytes = encode(message)?;
        self.socket
            .send_to(&bytes, self.peer)
            .await
            .map_err(|e| DomainError::IoError(format!("send to {}: {}", self.peer, e)))?;
        Ok(())
    }
}

/// UDP front end: decodes datagrams, classifies them and hands them to the
/// dispatcher, one task per datagram.
pub struct UdpDnsServer {
    socket: Arc<UdpSocket>,
    dispatcher: Arc<Dispatcher>,
    classifier: Arc<SuffixClassifier>,
}

impl UdpDnsServer {
    pub async fn bind(
        addr: SocketAddr,
        dispatcher: Arc<Dispatcher>,
        classifier: Arc<SuffixClassifier>,
    ) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| DomainError::IoError(format!("bind {}: {}", addr, e)))?;

        Ok(Self {
            socket: Arc::new(socket),
            dispatcher,
            classifier,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    pub async fn run(self) -> Result<(), DomainError> {
        info!(bind_address = %self.local_addr()?, protocol = "UDP", "DNS server listening");

        let mut buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];
        loop {
            let (len, peer) = self
                .socket
                .recv_from(&mut buf)
                .await
                .map_err(|e| DomainError::IoError(format!("recv: {}", e)))?;

            let datagram = buf[..len].to_vec();
            let socket = self.socket.clone();
            let dispatcher = self.dispatcher.clone();
            let classifier = self.classifier.clone();

            tokio::spawn(async move {
                handle_datagram(&datagram, peer, socket, &dispatcher, &classifier).await;
            });
        }
    }
}

async fn handle_datagram(
    datagram: &[u8],
    peer: SocketAddr,
    socket: Arc<UdpSocket>,
    dispatcher: &Dispatcher,
    classifier: &SuffixClassifier,
) {
    let message = match decode(datagram) {
        Ok(message) => message,
        Err(e) => {
            debug!(%peer, error = %e, "Dropping undecodable datagram");
            return;
        }
    };

    let classification = classifier.classify(&message);
    let mut writer = UdpResponseWriter::new(socket, peer);

    if let Err(e) = dispatcher.handle(classification, &mut writer, &message).await {
        debug!(%peer, error = %e, "Request not dispatched");
    }
}
