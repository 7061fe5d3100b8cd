use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::graph::TermGraph;
use crate::model::Term;
use crate::rpc::{ListTermsResponse, TermMessage};

/// The six glossary operations, independent of where they run.
/// Implemented in-process by `GlossaryService` and remotely by the
/// gateway's RPC client.
#[async_trait]
pub trait GlossaryApi: Send + Sync {
    async fn upsert_term(&self, term: TermMessage) -> Result<Term, ServiceError>;
    async fn get_term(&self, id: &str) -> Result<Term, ServiceError>;
    async fn delete_term(&self, id: &str) -> Result<bool, ServiceError>;
    async fn list_terms(&self, page: i64, page_size: i64) -> Result<ListTermsResponse, ServiceError>;
    async fn search_terms(&self, query: &str, limit: i64) -> Result<Vec<Term>, ServiceError>;
    async fn get_graph(&self, include_orphans: bool) -> Result<TermGraph, ServiceError>;
}
