//! # dnsprofiler
//!
//! Classifying DNS front end that profiles the most queried names per hour.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use dnsprofiler_domain::CliOverrides;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dnsprofiler")]
#[command(version)]
#[command(about = "DNS request classifier with hourly top-name snapshots")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Metrics server port
    #[arg(short = 'm', long)]
    metrics_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Directory for the hourly snapshot files
    #[arg(long)]
    snapshot_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        dns_port: cli.dns_port,
        metrics_port: cli.metrics_port,
        bind_address: cli.bind,
        snapshot_dir: cli.snapshot_dir,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    let services = di::Services::build(&config).await?;

    let dns_addr = config.server.dns_socket_addr()?;
    let metrics_addr = config.server.metrics_socket_addr()?;

    let dns = server::start_dns_server(dns_addr, &services);
    let metrics = server::start_web_server(metrics_addr, services.counters.clone());

    tokio::select! {
        result = dns => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server stopped");
            }
            result?;
        }
        result = metrics => {
            if let Err(e) = &result {
                error!(error = %e, "Metrics server stopped");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
