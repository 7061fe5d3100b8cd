use std::future::Future;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::observability::TERMS_STORED;
use crate::routes::{self, AppState};
use service::{GlossaryService, TermStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the term store named by the config and wrap it in the service.
/// A malformed data file fails here, before anything is bound.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let store = TermStore::open(&cfg.storage.data_path).await?;
    TERMS_STORED.set(store.len().await as i64);
    Ok(AppState { glossary: GlossaryService::new(store) })
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve on an already-bound listener until `shutdown` resolves, then flush
/// the store so the file reflects the final in-memory state.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = state.glossary.store().clone();
    let app = build_app(state);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    store.flush().await?;
    info!(path = %store.path().display(), "term store flushed on shutdown");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: open the store, bind the RPC listener and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, data = %cfg.storage.data_path.display(), "glossary rpc server listening");
    serve(listener, state, shutdown_signal()).await
}
