//! Handlers for the `glossary.GlossaryService` methods.

use axum::{extract::{rejection::JsonRejection, State}, Json};
use service::rpc::{
    DeleteTermResponse, GetGraphRequest, GetGraphResponse, ListTermsRequest, ListTermsResponse,
    SearchTermsRequest, SearchTermsResponse, TermId, TermResponse, UpsertTermRequest,
};
use tracing::info;

use crate::errors::RpcError;
use crate::observability::TERMS_STORED;
use crate::routes::AppState;

async fn refresh_term_gauge(state: &AppState) {
    TERMS_STORED.set(state.glossary.store().len().await as i64);
}

pub async fn upsert_term(
    State(state): State<AppState>,
    payload: Result<Json<UpsertTermRequest>, JsonRejection>,
) -> Result<Json<TermResponse>, RpcError> {
    let Json(req) = payload?;
    let term = state.glossary.upsert_term(req.term).await?;
    refresh_term_gauge(&state).await;
    Ok(Json(TermResponse { term }))
}

pub async fn get_term(
    State(state): State<AppState>,
    payload: Result<Json<TermId>, JsonRejection>,
) -> Result<Json<TermResponse>, RpcError> {
    let Json(req) = payload?;
    let term = state.glossary.get_term(&req.id).await?;
    Ok(Json(TermResponse { term }))
}

pub async fn delete_term(
    State(state): State<AppState>,
    payload: Result<Json<TermId>, JsonRejection>,
) -> Result<Json<DeleteTermResponse>, RpcError> {
    let Json(req) = payload?;
    let deleted = state.glossary.delete_term(&req.id).await?;
    if deleted {
        refresh_term_gauge(&state).await;
    }
    Ok(Json(DeleteTermResponse { deleted }))
}

pub async fn list_terms(
    State(state): State<AppState>,
    payload: Result<Json<ListTermsRequest>, JsonRejection>,
) -> Result<Json<ListTermsResponse>, RpcError> {
    let Json(req) = payload?;
    Ok(Json(state.glossary.list_terms(req.page, req.page_size).await))
}

pub async fn search_terms(
    State(state): State<AppState>,
    payload: Result<Json<SearchTermsRequest>, JsonRejection>,
) -> Result<Json<SearchTermsResponse>, RpcError> {
    let Json(req) = payload?;
    let terms = state.glossary.search_terms(&req.query, req.limit).await;
    info!(query = %req.query, hits = terms.len(), "search");
    Ok(Json(SearchTermsResponse { terms }))
}

pub async fn get_graph(
    State(state): State<AppState>,
    payload: Result<Json<GetGraphRequest>, JsonRejection>,
) -> Result<Json<GetGraphResponse>, RpcError> {
    let Json(req) = payload?;
    Ok(Json(state.glossary.get_graph(req.include_orphans).await))
}
