use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};
use service::rpc::method;

use crate::errors::code_for;

// Prometheus metrics (default registry)
pub static RPC_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "glossary_rpc_requests_total",
        "Total RPC calls handled, by method",
        &["method"]
    )
    .expect("register rpc_requests_total")
});

pub static RPC_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "glossary_rpc_errors_total",
        "Total failed RPC calls, by method and status code",
        &["method", "code"]
    )
    .expect("register rpc_errors_total")
});

pub static RPC_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "glossary_rpc_duration_seconds",
        "RPC handling time in seconds",
        &["method"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("register rpc_duration")
});

pub static TERMS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("glossary_terms", "Number of terms currently stored")
        .expect("register terms gauge")
});

/// Middleware around the RPC routes: counts calls, failures and latency.
pub async fn track_rpc(req: Request, next: Next) -> Response {
    let name = method::short_name(req.uri().path()).to_string();
    let started = Instant::now();
    let response = next.run(req).await;

    RPC_REQUESTS_TOTAL.with_label_values(&[name.as_str()]).inc();
    RPC_DURATION.with_label_values(&[name.as_str()]).observe(started.elapsed().as_secs_f64());
    if !response.status().is_success() {
        let code = code_for(response.status());
        RPC_ERRORS_TOTAL.with_label_values(&[name.as_str(), code.as_str()]).inc();
    }
    response
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
