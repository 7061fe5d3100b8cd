use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{debug, Level};

use common::types::Health;
use service::api::GlossaryApi;
use service::Term;

use crate::errors::{GatewayError, HtmlError};
use crate::render;

/// Page sizes and limits the gateway asks the RPC service for.
const HOME_PAGE_SIZE: i64 = 200;
const HOME_SEARCH_LIMIT: i64 = 50;
const API_PAGE_SIZE: i64 = 1000;

#[derive(Clone)]
pub struct GatewayState {
    pub api: Arc<dyn GlossaryApi>,
}

impl GatewayState {
    pub fn new(api: Arc<dyn GlossaryApi>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TermListJson {
    pub total: u64,
    pub terms: Vec<Term>,
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Term list, or search results when `q` is non-empty.
pub async fn home(
    State(state): State<GatewayState>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, HtmlError> {
    let q = query.q.unwrap_or_default();
    let (title, terms) = if q.is_empty() {
        let res = state.api.list_terms(1, HOME_PAGE_SIZE).await?;
        ("Glossary".to_string(), res.terms)
    } else {
        let hits = state.api.search_terms(&q, HOME_SEARCH_LIMIT).await?;
        debug!(%q, hits = hits.len(), "search page");
        (format!("Search: {q}"), hits)
    };
    Ok(Html(render::page(&title, &render::term_list(&terms, &q))))
}

pub async fn term_page(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HtmlError> {
    let t = state.api.get_term(&id).await?;
    Ok(Html(render::page(&t.term, &render::term_detail(&t))))
}

pub async fn graph_page(State(state): State<GatewayState>) -> Result<Html<String>, HtmlError> {
    let graph = state.api.get_graph(false).await?;
    Ok(Html(render::page("Term graph", &render::graph_text(&graph))))
}

pub async fn api_terms(State(state): State<GatewayState>) -> Result<Json<TermListJson>, GatewayError> {
    let res = state.api.list_terms(1, API_PAGE_SIZE).await?;
    Ok(Json(TermListJson { total: res.total, terms: res.terms }))
}

pub async fn api_term(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Term>, GatewayError> {
    Ok(Json(state.api.get_term(&id).await?))
}

/// Read-only HTML and JSON views over the glossary.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/term/:id", get(term_page))
        .route("/graph", get(graph_page))
        .route("/api/terms", get(api_terms))
        .route("/api/terms/:id", get(api_term))
        .route("/health", get(health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
