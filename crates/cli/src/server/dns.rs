use crate::di::Services;
use dnsprofiler_infrastructure::dns::UdpDnsServer;
use std::net::SocketAddr;
use tracing::info;

pub async fn start_dns_server(bind_addr: SocketAddr, services: &Services) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting DNS server");

    let server = UdpDnsServer::bind(
        bind_addr,
        services.dispatcher.clone(),
        services.classifier.clone(),
    )
    .await?;

    info!("DNS server ready to accept queries");

    server.run().await?;

    Ok(())
}
