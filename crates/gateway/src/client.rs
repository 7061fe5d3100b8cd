//! HTTP client for the glossary RPC service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use service::api::GlossaryApi;
use service::graph::TermGraph;
use service::rpc::{
    method, DeleteTermResponse, GetGraphRequest, ListTermsRequest, ListTermsResponse, RpcStatus,
    SearchTermsRequest, SearchTermsResponse, TermId, TermMessage, TermResponse, UpsertTermRequest,
};
use service::{ServiceError, Term};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    /// `base_url` is scheme + authority, e.g. `http://127.0.0.1:50051`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Unavailable(format!("build http client: {e}")))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<Req, Resp>(&self, path: &str, req: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + ?Sized + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "rpc call");
        let res = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| ServiceError::Unavailable(format!("{}: {e}", method::short_name(path))))?;

        let status = res.status();
        if status.is_success() {
            return res
                .json::<Resp>()
                .await
                .map_err(|e| ServiceError::Unavailable(format!("decode {} response: {e}", method::short_name(path))));
        }
        match res.json::<RpcStatus>().await {
            Ok(rpc_status) => Err(rpc_status.into()),
            Err(_) => {
                warn!(%url, %status, "rpc failed without a status body");
                Err(ServiceError::Unavailable(format!("{} returned {status}", method::short_name(path))))
            }
        }
    }
}

#[async_trait]
impl GlossaryApi for RpcClient {
    async fn upsert_term(&self, term: TermMessage) -> Result<Term, ServiceError> {
        let res: TermResponse = self.call(method::UPSERT_TERM, &UpsertTermRequest { term }).await?;
        Ok(res.term)
    }

    async fn get_term(&self, id: &str) -> Result<Term, ServiceError> {
        let res: TermResponse = self.call(method::GET_TERM, &TermId { id: id.to_string() }).await?;
        Ok(res.term)
    }

    async fn delete_term(&self, id: &str) -> Result<bool, ServiceError> {
        let res: DeleteTermResponse = self.call(method::DELETE_TERM, &TermId { id: id.to_string() }).await?;
        Ok(res.deleted)
    }

    async fn list_terms(&self, page: i64, page_size: i64) -> Result<ListTermsResponse, ServiceError> {
        self.call(method::LIST_TERMS, &ListTermsRequest { page, page_size }).await
    }

    async fn search_terms(&self, query: &str, limit: i64) -> Result<Vec<Term>, ServiceError> {
        let req = SearchTermsRequest { query: query.to_string(), limit };
        let res: SearchTermsResponse = self.call(method::SEARCH_TERMS, &req).await?;
        Ok(res.terms)
    }

    async fn get_graph(&self, include_orphans: bool) -> Result<TermGraph, ServiceError> {
        self.call(method::GET_GRAPH, &GetGraphRequest { include_orphans }).await
    }
}
