//! Runs the server on an ephemeral port and talks to it over HTTP.

#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use ingres_core::IngresConfig;
use ingres_server::{AppState, app, build_engine};
use reqwest::Client;
use serde_json::{Value as JsonValue, json};
use std::io::Write as _;
use std::net::SocketAddr;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

const CONFIG: &str = r#"
[upstream]
enabled = false

[sessions]
max_sessions = 16

[dialogue]
default_year = "2024-2025"
"#;

async fn spawn_server() -> SocketAddr {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(CONFIG.as_bytes()).expect("write config");
    let config = IngresConfig::load(Some(file.path())).expect("config loads");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = app(AppState::new(build_engine(&config, true)));
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server runs");
    });
    addr
}

async fn post_query(addr: SocketAddr, body: JsonValue) -> (u16, JsonValue) {
    let response = Client::new()
        .post(format!("http://{addr}/api/query"))
        .json(&body)
        .send()
        .await
        .expect("request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("json body"))
}

#[tokio::test]
async fn test_health_endpoint() {
    let addr = spawn_server().await;
    let body: JsonValue = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_data_then_follow_up_over_http() {
    let addr = spawn_server().await;

    let (status, data) = post_query(
        addr,
        json!({ "message": "Show Pune data", "sessionId": "browser-1" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(data["type"], "data");
    assert_eq!(data["queryParams"]["location"], "Pune");
    assert_eq!(data["queryParams"]["year"], "2024-2025");
    assert_eq!(data["rawData"].as_array().map(Vec::len), Some(3));
    assert_eq!(data["rawData"][0]["unit"], "MCM");

    let (status, follow_up) = post_query(
        addr,
        json!({ "message": "Pune ka data kyu dikhaya", "sessionId": "browser-1" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(follow_up["type"], "conversation");
    assert_eq!(follow_up["language"], "hinglish");
    assert!(
        follow_up["reply"]
            .as_str()
            .is_some_and(|reply| reply.contains("\"Show Pune data\""))
    );
}

#[tokio::test]
async fn test_missing_fields_use_defaults() {
    let addr = spawn_server().await;
    let (status, body) = post_query(addr, json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["type"], "text");
    assert!(body.get("language").is_none());
}
