//! Integration Test: アクションAPI
//!
//! チケット作成はベストエフォート、パイプライン起動の失敗は取得済みチケットと共に500で返す。

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::portal::{base_config, ci_config, spawn_portal, tracker_config};

const UNUSED: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_check_disk_with_ticketing_disabled() {
    let gitlab = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/17/trigger/pipeline"))
        .and(body_string_contains("variables%5BPORTAL_ACTION%5D=check_disk"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 4242,
            "web_url": "https://gitlab.example.com/p/4242"
        })))
        .expect(1)
        .mount(&gitlab)
        .await;

    let mut config = base_config(UNUSED);
    config.ci = ci_config(&gitlab.uri());
    let server = spawn_portal(config).await;

    let resp = Client::new()
        .post(server.url("/run/check_disk"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["ticket_ref"], json!("JIRA_DISABLED"));
    assert_eq!(body["pipeline_id"], json!(4242));
    assert_eq!(body["pipeline_url"], json!("https://gitlab.example.com/p/4242"));

    server.stop().await;
}

#[tokio::test]
async fn test_trigger_failure_returns_ticket() {
    let jira = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"key": "OPS-77"})))
        .expect(1)
        .mount(&jira)
        .await;
    let gitlab = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/17/trigger/pipeline"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&gitlab)
        .await;

    let mut config = base_config(UNUSED);
    config.tracker = tracker_config(&jira.uri());
    config.ci = ci_config(&gitlab.uri());
    let server = spawn_portal(config).await;

    let resp = Client::new()
        .post(server.url("/run/restart_portal"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ticket_ref"], json!("OPS-77"));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("pipeline trigger failed"));

    server.stop().await;
}

#[tokio::test]
async fn test_missing_gitlab_config_is_500_with_names() {
    let server = spawn_portal(base_config(UNUSED)).await;

    let resp = Client::new()
        .post(server.url("/run/backup_portal"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ticket_ref"], json!("JIRA_DISABLED"));
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("GITLAB_URL"));
    assert!(error.contains("GITLAB_PROJECT_ID"));
    assert!(error.contains("GITLAB_TRIGGER_TOKEN"));

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_action_makes_no_outbound_calls() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&upstream)
        .await;

    let mut config = base_config(UNUSED);
    config.tracker = tracker_config(&upstream.uri());
    config.ci = ci_config(&upstream.uri());
    let server = spawn_portal(config).await;

    let resp = Client::new()
        .post(server.url("/run/delete_everything"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"error": "unknown action"}));

    server.stop().await;
}

#[tokio::test]
async fn test_token_required_when_configured() {
    let gitlab = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/17/trigger/pipeline"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(2)
        .mount(&gitlab)
        .await;

    let mut config = base_config(UNUSED);
    config.auth_token = Some("s3cret".to_string());
    config.ci = ci_config(&gitlab.uri());
    let server = spawn_portal(config).await;
    let client = Client::new();

    let missing = client
        .post(server.url("/run/check_disk"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 401);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], json!("unauthorized: bad token"));

    let wrong = client
        .post(server.url("/run/check_disk"))
        .header("X-Portal-Token", "nope")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 401);

    let via_header = client
        .post(server.url("/run/check_disk"))
        .header("X-Portal-Token", "s3cret")
        .send()
        .await
        .unwrap();
    assert_eq!(via_header.status().as_u16(), 200);

    let via_query = client
        .post(server.url("/run/check_disk?token=s3cret"))
        .send()
        .await
        .unwrap();
    assert_eq!(via_query.status().as_u16(), 200);

    server.stop().await;
}

#[tokio::test]
async fn test_client_disconnect_does_not_cancel_action() {
    let jira = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"key": "OPS-91"}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&jira)
        .await;
    let gitlab = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/17/trigger/pipeline"))
        .and(body_string_contains("variables%5BPORTAL_ACTION%5D=backup_portal"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&gitlab)
        .await;

    let mut config = base_config(UNUSED);
    config.tracker = tracker_config(&jira.uri());
    config.ci = ci_config(&gitlab.uri());
    let server = spawn_portal(config).await;

    // チケット作成の途中でクライアント側が接続を切る
    let result = Client::new()
        .post(server.url("/run/backup_portal"))
        .timeout(Duration::from_millis(100))
        .send()
        .await;
    assert!(result.is_err());

    let mut triggered = 0;
    for _ in 0..40 {
        triggered = gitlab
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0);
        if triggered > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(triggered, 1);

    server.stop().await;
}
