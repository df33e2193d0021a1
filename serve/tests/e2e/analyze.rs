use std::collections::BTreeSet;
use std::sync::Arc;

use advisor::{AnalysisOptions, AnalysisService, MockLlm};
use reqwest::StatusCode;
use serde_json::json;

use super::common;

const OPPORTUNITY_FIELDS: [&str; 6] = [
    "original_step",
    "inefficiency_type",
    "estimated_impact",
    "recommended_solution",
    "suggested_tool",
    "relevant_prompt_or_code",
];

/// **Scenario**: domain "Contabilitate" with an invoice-entry description returns 200, exactly
/// the three top-level keys, at least two opportunities, each with all six string fields.
#[tokio::test]
async fn e2e_analyze_accounting_process() {
    let mock = Arc::new(MockLlm::with_sample_analysis());
    let server = common::spawn_server(AnalysisService::with_client(mock.clone())).await;

    let (status, body) = common::post_analyze(
        &server,
        json!({"domeniu": "Contabilitate", "description": "Introducere manuală a facturilor în Excel"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let keys: BTreeSet<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        BTreeSet::from(["general_analysis", "next_steps", "optimization_opportunities"])
    );
    let opportunities = body["optimization_opportunities"].as_array().unwrap();
    assert!(opportunities.len() >= 2);
    for o in opportunities {
        for field in OPPORTUNITY_FIELDS {
            assert!(o[field].is_string(), "missing {} in {}", field, o);
        }
        assert!(!o["original_step"].as_str().unwrap().is_empty());
    }
    assert_eq!(mock.call_count(), 1);

    server.stop().await;
}

/// **Scenario**: domain and description both absent → 400 with a non-empty error, provider untouched.
#[tokio::test]
async fn e2e_analyze_without_fields_is_400() {
    let mock = Arc::new(MockLlm::with_sample_analysis());
    let server = common::spawn_server(AnalysisService::with_client(mock.clone())).await;

    let (status, body) = common::post_analyze(&server, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    assert_eq!(mock.call_count(), 0);

    server.stop().await;
}

/// **Scenario**: no provider client at startup → every valid payload gets 503.
#[tokio::test]
async fn e2e_analyze_degraded_is_503() {
    let server = common::spawn_server(AnalysisService::degraded(AnalysisOptions::default())).await;

    for payload in [
        json!({"description": "Introducere manuală a facturilor în Excel"}),
        json!({"domeniu": "HR", "description": "onboarding paperwork"}),
    ] {
        let (status, body) = common::post_analyze(&server, payload).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].is_string());
    }

    server.stop().await;
}

/// **Scenario**: a provider failure is a 500 with an error field, and the server keeps serving.
#[tokio::test]
async fn e2e_provider_failure_is_500_and_server_survives() {
    let mock = Arc::new(MockLlm::failing("RESOURCE_EXHAUSTED: quota exceeded"));
    let server = common::spawn_server(AnalysisService::with_client(mock.clone())).await;

    for _ in 0..2 {
        let (status, body) =
            common::post_analyze(&server, json!({"description": "x"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
    }
    assert_eq!(mock.call_count(), 2);

    let health = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn e2e_invalid_json_body_is_400() {
    let server = common::spawn_server(AnalysisService::with_client(Arc::new(
        MockLlm::with_sample_analysis(),
    )))
    .await;

    let resp = reqwest::Client::new()
        .post(server.url("/api/analyze"))
        .header("content-type", "application/json")
        .body("not valid json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    server.stop().await;
}
