//! Glossary use cases.
//!
//! Thin layer over `TermStore` that applies the RPC defaults (page size,
//! search limit) and turns loosely-typed wire terms into validated records.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::GlossaryApi;
use crate::errors::ServiceError;
use crate::graph::TermGraph;
use crate::model::Term;
use crate::pagination::Pagination;
use crate::rpc::{ListTermsResponse, TermMessage};
use crate::storage::term_store::TermStore;

/// Search limit used when the caller sends a non-positive value.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct GlossaryService {
    store: Arc<TermStore>,
}

impl GlossaryService {
    pub fn new(store: Arc<TermStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<TermStore> {
        &self.store
    }

    pub async fn upsert_term(&self, term: TermMessage) -> Result<Term, ServiceError> {
        let term = term.into_term()?;
        let saved = self.store.upsert(term).await?;
        info!(id = %saved.id, term = %saved.term, "term saved");
        Ok(saved)
    }

    pub async fn get_term(&self, id: &str) -> Result<Term, ServiceError> {
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found("term"))
    }

    pub async fn delete_term(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!(%id, "term deleted");
        }
        Ok(deleted)
    }

    pub async fn list_terms(&self, page: i64, page_size: i64) -> ListTermsResponse {
        let all = self.store.list().await;
        let p = Pagination::new(page, page_size).normalize();
        ListTermsResponse {
            terms: p.slice(&all).to_vec(),
            page: p.page,
            page_size: p.page_size,
            total: all.len() as u64,
        }
    }

    pub async fn search_terms(&self, query: &str, limit: i64) -> Vec<Term> {
        let limit = if limit > 0 { limit } else { DEFAULT_SEARCH_LIMIT };
        self.store.search(query, limit).await
    }

    pub async fn get_graph(&self, include_orphans: bool) -> TermGraph {
        TermGraph::derive(self.store.list().await, include_orphans)
    }
}

#[async_trait]
impl GlossaryApi for GlossaryService {
    async fn upsert_term(&self, term: TermMessage) -> Result<Term, ServiceError> { self.upsert_term(term).await }
    async fn get_term(&self, id: &str) -> Result<Term, ServiceError> { self.get_term(id).await }
    async fn delete_term(&self, id: &str) -> Result<bool, ServiceError> { self.delete_term(id).await }
    async fn list_terms(&self, page: i64, page_size: i64) -> Result<ListTermsResponse, ServiceError> {
        Ok(self.list_terms(page, page_size).await)
    }
    async fn search_terms(&self, query: &str, limit: i64) -> Result<Vec<Term>, ServiceError> {
        Ok(self.search_terms(query, limit).await)
    }
    async fn get_graph(&self, include_orphans: bool) -> Result<TermGraph, ServiceError> {
        Ok(self.get_graph(include_orphans).await)
    }
}
