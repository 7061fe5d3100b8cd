use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use uuid::Uuid;

use gateway::client::RpcClient;
use gateway::routes::{build_router, GatewayState};
use service::api::GlossaryApi;
use service::rpc::TermMessage;
use service::ServiceError;

/// Start the real RPC server on an ephemeral port and return its base URL.
async fn start_rpc_server() -> anyhow::Result<String> {
    let mut cfg = configs::AppConfig::default();
    cfg.storage.data_path = std::env::temp_dir()
        .join(format!("gateway-e2e-{}", Uuid::new_v4()))
        .join("terms.json");
    let state = server::startup::build_state(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(server::startup::serve(listener, state, std::future::pending()));
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

async fn start_gateway(client: RpcClient) -> anyhow::Result<String> {
    let app = build_router(GatewayState::new(Arc::new(client)));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("gateway error: {}", e); }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

#[tokio::test]
async fn client_speaks_every_method() -> anyhow::Result<()> {
    let base = start_rpc_server().await?;
    let client = RpcClient::new(format!("{base}/"), Duration::from_secs(5))?;
    assert_eq!(client.base_url(), base);

    let err = client
        .upsert_term(TermMessage { term: "x".into(), ..TermMessage::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m == "definition is required"));

    let a = client
        .upsert_term(TermMessage { term: "Virtual DOM".into(), definition: "diffing".into(), ..TermMessage::default() })
        .await?;
    let b = client
        .upsert_term(TermMessage {
            term: "React".into(),
            definition: "uses a virtual dom".into(),
            related_ids: vec![a.id.clone()],
            ..TermMessage::default()
        })
        .await?;

    assert_eq!(client.get_term(&a.id).await?, a);
    assert!(matches!(client.get_term("nope").await, Err(ServiceError::NotFound(_))));

    let page = client.list_terms(0, 0).await?;
    assert_eq!((page.total, page.page, page.page_size), (2, 1, 50));

    let hits = client.search_terms("virtual", 10).await?;
    let names: Vec<&str> = hits.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(names, vec!["Virtual DOM", "React"]);

    assert_eq!(client.get_graph(false).await?.edges.len(), 1);
    assert!(client.delete_term(&a.id).await?);
    assert!(client.get_term(&b.id).await?.related_ids.is_empty());
    assert!(client.get_graph(true).await?.edges.is_empty());
    Ok(())
}

#[tokio::test]
async fn gateway_over_network_and_unreachable_upstream() -> anyhow::Result<()> {
    let base = start_rpc_server().await?;
    let client = RpcClient::new(&base, Duration::from_secs(5))?;
    client
        .upsert_term(TermMessage { id: "wc".into(), term: "Web Components".into(), definition: "standards".into(), ..TermMessage::default() })
        .await?;

    let gw = start_gateway(client).await?;
    let html = reqwest::get(format!("{gw}/term/wc")).await?.text().await?;
    assert!(html.contains("<h2>Web Components</h2>"));
    let res = reqwest::get(format!("{gw}/api/terms/none")).await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    // nothing listens on port 9 of localhost
    let dead = RpcClient::new("http://127.0.0.1:9", Duration::from_millis(500))?;
    let gw = start_gateway(dead).await?;
    let res = reqwest::get(format!("{gw}/api/terms")).await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_GATEWAY);
    let res = reqwest::get(format!("{gw}/")).await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_GATEWAY);
    Ok(())
}
