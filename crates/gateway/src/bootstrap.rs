use std::sync::Arc;

use configs::GatewayConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::client::RpcClient;
use crate::routes::{build_router, GatewayState};

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "gateway", event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Bind the gateway and forward every view to the RPC service at
/// `cfg.upstream_url`. The service is not contacted until the first request.
pub async fn run(cfg: &GatewayConfig) -> anyhow::Result<()> {
    let client = RpcClient::new(&cfg.upstream_url, cfg.request_timeout())?;
    let app = build_router(GatewayState::new(Arc::new(client)));

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, upstream = %cfg.upstream_url, "glossary gateway listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
