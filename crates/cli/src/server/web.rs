use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use dnsprofiler_infrastructure::metrics::RequestCounters;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_web_server(
    bind_addr: SocketAddr,
    counters: Arc<RequestCounters>,
) -> anyhow::Result<()> {
    let app = create_app(counters);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(bind_address = %bind_addr, "Metrics server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(counters: Arc<RequestCounters>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(counters)
}

async fn metrics(State(counters): State<Arc<RequestCounters>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        counters.to_prometheus_text(),
    )
}

async fn health_check() -> &'static str {
    "OK"
}
