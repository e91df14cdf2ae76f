use dnsprofiler_domain::config::LogFormat;
use dnsprofiler_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `logging.level` when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(filter);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.with_ansi(true).init(),
    }

    info!(
        level = %config.logging.level,
        format = ?config.logging.format,
        dns_port = config.server.dns_port,
        metrics_port = config.server.metrics_port,
        bind = %config.server.bind_address,
        snapshot_dir = %config.profiling.directory.display(),
        "Configuration loaded"
    );
}
