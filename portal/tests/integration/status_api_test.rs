//! Integration Test: ステータスAPI
//!
//! 監視対象の一部が落ちていても200で部分結果を返す。

use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::portal::{base_config, spawn_portal};

fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_status_reports_every_target_in_order() {
    let up = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&up)
        .await;
    let broken = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    let mut config = base_config(&up.uri());
    config.monitor_targets = format!(
        "Web|{},Broken|{},Dead|tcp://127.0.0.1:{},junk-entry",
        up.uri(),
        broken.uri(),
        refused_port()
    );
    let server = spawn_portal(config).await;

    let resp = Client::new()
        .get(server.url("/api/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["pipeline"], Value::Null);

    let services = body["services"].as_array().unwrap();
    let names: Vec<&str> = services
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Web", "Broken", "Dead", "Grafana", "Portal API"]);

    assert_eq!(services[0]["up"], json!(true));
    assert_eq!(services[0]["status"], json!(200));
    assert_eq!(services[1]["up"], json!(false));
    assert_eq!(services[1]["status"], json!(503));
    assert_eq!(services[2]["up"], json!(false));
    assert!(services[2]["status"].is_string());
    assert!(services[2]["latency_ms"].is_u64());
    assert!(services[2]["target"].as_str().unwrap().starts_with("tcp://"));

    server.stop().await;
}

#[tokio::test]
async fn test_status_includes_latest_pipeline() {
    let mock = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/17/pipelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 900,
            "status": "running",
            "ref": "main",
            "sha": "deadbeef",
            "web_url": "https://gitlab.example.com/p/900"
        }])))
        .mount(&mock)
        .await;

    let mut config = base_config(&mock.uri());
    config.ci.url = mock.uri();
    config.ci.project_id = "17".to_string();
    config.ci.api_token = "api-token".to_string();
    let server = spawn_portal(config).await;

    let body: Value = Client::new()
        .get(server.url("/api/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body["pipeline"],
        json!({
            "id": 900,
            "status": "running",
            "ref": "main",
            "sha": "deadbeef",
            "web_url": "https://gitlab.example.com/p/900"
        })
    );
    // GitLabも既知サービスとして監視対象に入る
    assert_eq!(body["services"][0]["name"], json!("GitLab"));

    server.stop().await;
}
