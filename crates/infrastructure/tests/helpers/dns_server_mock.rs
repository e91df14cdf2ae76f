use dnsprofiler_infrastructure::dns::wire::{decode, encode, reply_to};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Upstream resolver stand-in answering every question with one A record.
///
/// A silent upstream receives queries but never replies.
pub struct MockUpstream {
    addr: SocketAddr,
    received: Arc<AtomicU64>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub const MOCK_ANSWER: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

impl MockUpstream {
    pub async fn start() -> Self {
        Self::spawn(true).await
    }

    pub async fn start_silent() -> Self {
        Self::spawn(false).await
    }

    async fn spawn(answer: bool) -> Self {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(AtomicU64::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = received.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::Relaxed);
                        if !answer {
                            continue;
                        }
                        let Ok(request) = decode(&buf[..len]) else { continue };
                        let mut response = reply_to(&request, ResponseCode::NoError);
                        response.set_recursion_available(true);
                        for q in request.queries() {
                            response.add_answer(Record::from_rdata(
                                q.name().clone(),
                                60,
                                RData::A(A::from(MOCK_ANSWER)),
                            ));
                        }
                        let bytes = encode(&response).unwrap();
                        let _ = socket.send_to(&bytes, peer).await;
                    }
                }
            }
        });

        Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
