//! Integration Test: ディスク使用量レポート

use reqwest::Client;
use serde_json::{json, Value};

use crate::support::portal::{base_config, spawn_portal};

const UNUSED: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_disk_report_not_ready() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = base_config(UNUSED);
    config.reports_dir = dir.path().to_path_buf();
    let server = spawn_portal(config).await;
    let client = Client::new();

    let check = client
        .get(server.url("/ops/disk?check=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(check.status().as_u16(), 404);

    let report = client.get(server.url("/ops/disk")).send().await.unwrap();
    assert_eq!(report.status().as_u16(), 404);
    let body: Value = report.json().await.unwrap();
    assert_eq!(body["error"], json!("Report not found yet. Run the check first"));

    server.stop().await;
}

#[tokio::test]
async fn test_disk_report_latest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("check_disk_1.json"),
        json!({
            "df": "Filesystem Size Used\n/dev/vda1 80G 41G\n",
            "docker_df": "Images 3",
            "generated_at": "2024-05-01T10:00:00Z"
        })
        .to_string(),
    )
    .unwrap();

    let mut config = base_config(UNUSED);
    config.reports_dir = dir.path().to_path_buf();
    let server = spawn_portal(config).await;
    let client = Client::new();

    let check = client
        .get(server.url("/ops/disk?check=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(check.status().as_u16(), 200);

    let body: Value = client
        .get(server.url("/ops/disk"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["generated_at"], json!("2024-05-01T10:00:00Z"));
    assert_eq!(body["headers"], json!(["Filesystem", "Size", "Used"]));
    assert_eq!(body["rows"], json!([["/dev/vda1", "80G", "41G"]]));
    assert_eq!(body["docker_info"], json!("Images 3"));

    server.stop().await;
}
