use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::render;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("glossary service error: {0}")]
    Upstream(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ServiceError> for GatewayError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(m) => Self::NotFound(m),
            ServiceError::Validation(m) => Self::BadRequest(m),
            other => Self::Upstream(other.message()),
        }
    }
}

/// JSON rendering: `{"detail": "..."}`.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "upstream call failed");
        }
        (status, Json(serde_json::json!({"detail": self.to_string()}))).into_response()
    }
}

/// Same error, rendered as an HTML page for the browser routes.
#[derive(Debug)]
pub struct HtmlError(pub GatewayError);

impl From<ServiceError> for HtmlError {
    fn from(e: ServiceError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status.is_server_error() {
            error!(error = %self.0, "upstream call failed");
        }
        let title = match &self.0 {
            GatewayError::NotFound(_) => "Not found",
            GatewayError::BadRequest(_) => "Bad request",
            GatewayError::Upstream(_) => "Glossary unavailable",
        };
        let body = format!("<p>{}</p>", render::escape(&self.0.to_string()));
        (status, Html(render::page(title, &body))).into_response()
    }
}
