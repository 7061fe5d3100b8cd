use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::rpc::{RpcCode, RpcStatus};
use service::ServiceError;
use tracing::error;

/// RPC failure rendered as a status code plus `{"code", "message"}` body.
#[derive(Debug)]
pub struct RpcError(pub RpcStatus);

impl RpcError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self(RpcStatus { code: RpcCode::InvalidArgument, message: msg.into() })
    }

    pub fn status_code(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

pub fn status_for(code: RpcCode) -> StatusCode {
    match code {
        RpcCode::InvalidArgument => StatusCode::BAD_REQUEST,
        RpcCode::NotFound => StatusCode::NOT_FOUND,
        RpcCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        RpcCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Inverse of `status_for`, used when labelling error metrics.
pub fn code_for(status: StatusCode) -> RpcCode {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            RpcCode::InvalidArgument
        }
        StatusCode::NOT_FOUND => RpcCode::NotFound,
        StatusCode::SERVICE_UNAVAILABLE => RpcCode::Unavailable,
        _ => RpcCode::Internal,
    }
}

impl From<ServiceError> for RpcError {
    fn from(e: ServiceError) -> Self {
        Self(RpcStatus::from(&e))
    }
}

impl From<JsonRejection> for RpcError {
    fn from(rej: JsonRejection) -> Self {
        Self::invalid_argument(rej.body_text())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.0.code.as_str(), message = %self.0.message, "rpc failed");
        }
        (status, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_http_statuses() {
        let cases = [
            (ServiceError::required("term"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("term"), StatusCode::NOT_FOUND),
            (ServiceError::Storage("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let rpc = RpcError::from(err);
            assert_eq!(rpc.status_code(), status);
            assert_eq!(status_for(code_for(status)), status);
        }
    }
}
