use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::{startup, AppState};

async fn state() -> AppState {
    let mut cfg = configs::AppConfig::default();
    cfg.storage.data_path = std::env::temp_dir().join(format!("glossary-router-{}.json", Uuid::new_v4()));
    startup::build_state(&cfg).await.expect("state")
}

fn rpc(method: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/glossary.GlossaryService/{method}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn malformed_json_is_invalid_argument() {
    let app = startup::build_app(state().await);
    let res = app.oneshot(rpc("UpsertTerm", "{not json")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn unknown_method_is_404_and_get_is_not_allowed() {
    let app = startup::build_app(state().await);
    let res = app.clone().oneshot(rpc("Nope", "{}")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = Request::builder()
        .uri("/glossary.GlossaryService/ListTerms")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn list_defaults_page_and_size() {
    let app = startup::build_app(state().await);
    let res = app.oneshot(rpc("ListTerms", r#"{"page": -2, "page_size": 0}"#)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body, json!({"terms": [], "page": 1, "page_size": 50, "total": 0}));
}
