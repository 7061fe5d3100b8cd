use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::{rpc::method, GlossaryService};

use crate::observability;

pub mod terms;

#[derive(Clone)]
pub struct AppState {
    pub glossary: GlossaryService,
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the RPC router: the six glossary methods plus health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let rpc = Router::new()
        .route(method::UPSERT_TERM, post(terms::upsert_term))
        .route(method::GET_TERM, post(terms::get_term))
        .route(method::DELETE_TERM, post(terms::delete_term))
        .route(method::LIST_TERMS, post(terms::list_terms))
        .route(method::SEARCH_TERMS, post(terms::search_terms))
        .route(method::GET_GRAPH, post(terms::get_graph))
        .route_layer(middleware::from_fn(observability::track_rpc));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics));

    rpc.merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::DEBUG),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
