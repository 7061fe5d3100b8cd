//! Wire messages of the glossary RPC service.
//!
//! Requests follow protobuf conventions: every field may be omitted and
//! decodes to its zero value. Responses always carry every field.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::graph::TermGraph;
use crate::model::Term;

/// Method paths, `POST`ed with a JSON body.
pub mod method {
    pub const UPSERT_TERM: &str = "/glossary.GlossaryService/UpsertTerm";
    pub const GET_TERM: &str = "/glossary.GlossaryService/GetTerm";
    pub const DELETE_TERM: &str = "/glossary.GlossaryService/DeleteTerm";
    pub const LIST_TERMS: &str = "/glossary.GlossaryService/ListTerms";
    pub const SEARCH_TERMS: &str = "/glossary.GlossaryService/SearchTerms";
    pub const GET_GRAPH: &str = "/glossary.GlossaryService/GetGraph";

    /// Short name used as a metrics label, e.g. `UpsertTerm`.
    pub fn short_name(path: &str) -> &str {
        path.rsplit('/').next().unwrap_or(path)
    }
}

/// Term as received from a client, before validation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TermMessage {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub sources: Vec<String>,
    pub tags: Vec<String>,
    pub related_ids: Vec<String>,
}

impl TermMessage {
    /// Trim name and definition and check both are present.
    pub fn into_term(self) -> Result<Term, ServiceError> {
        let term = self.term.trim().to_string();
        let definition = self.definition.trim().to_string();
        if term.is_empty() {
            return Err(ServiceError::required("term"));
        }
        if definition.is_empty() {
            return Err(ServiceError::required("definition"));
        }
        Ok(Term {
            id: self.id,
            term,
            definition,
            sources: self.sources,
            tags: self.tags,
            related_ids: self.related_ids,
        })
    }
}

impl From<Term> for TermMessage {
    fn from(t: Term) -> Self {
        Self {
            id: t.id,
            term: t.term,
            definition: t.definition,
            sources: t.sources,
            tags: t.tags,
            related_ids: t.related_ids,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpsertTermRequest {
    pub term: TermMessage,
}

/// Response of `UpsertTerm` and `GetTerm`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermResponse {
    pub term: Term,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TermId {
    pub id: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteTermResponse {
    pub deleted: bool,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListTermsRequest {
    pub page: i64,
    pub page_size: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListTermsResponse {
    pub terms: Vec<Term>,
    pub page: i64,
    pub page_size: i64,
    pub total: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchTermsRequest {
    pub query: String,
    pub limit: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTermsResponse {
    pub terms: Vec<Term>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GetGraphRequest {
    pub include_orphans: bool,
}

pub type GetGraphResponse = TermGraph;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcCode {
    InvalidArgument,
    NotFound,
    Internal,
    Unavailable,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

/// Error body returned with every non-2xx RPC response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcStatus {
    pub code: RpcCode,
    pub message: String,
}

impl From<&ServiceError> for RpcStatus {
    fn from(e: &ServiceError) -> Self {
        let code = match e {
            ServiceError::Validation(_) => RpcCode::InvalidArgument,
            ServiceError::NotFound(_) => RpcCode::NotFound,
            ServiceError::Unavailable(_) => RpcCode::Unavailable,
            ServiceError::Load { .. } | ServiceError::Storage(_) => RpcCode::Internal,
        };
        Self { code, message: e.message() }
    }
}

impl From<RpcStatus> for ServiceError {
    fn from(s: RpcStatus) -> Self {
        match s.code {
            RpcCode::InvalidArgument => ServiceError::Validation(s.message),
            RpcCode::NotFound => ServiceError::NotFound(s.message),
            RpcCode::Internal => ServiceError::Storage(s.message),
            RpcCode::Unavailable => ServiceError::Unavailable(s.message),
        }
    }
}
