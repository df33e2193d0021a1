use advisor::{AnalysisOptions, AnalysisService};
use serve::{HealthResponse, SERVICE_NAME};

use super::common;

#[tokio::test]
async fn e2e_health_returns_ok() {
    let server = common::spawn_server(AnalysisService::degraded(AnalysisOptions::default())).await;

    let resp = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: HealthResponse = resp.json().await.unwrap();
    assert_eq!(body.status, "ok");
    assert_eq!(body.service, SERVICE_NAME);

    server.stop().await;
}

#[tokio::test]
async fn e2e_responses_carry_cors_header() {
    let server = common::spawn_server(AnalysisService::degraded(AnalysisOptions::default())).await;

    let resp = reqwest::Client::new()
        .get(server.url("/"))
        .header("origin", "https://some-frontend.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    server.stop().await;
}
