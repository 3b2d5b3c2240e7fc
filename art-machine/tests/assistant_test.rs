mod common;

use art_machine::handlers::assistant::{IDEAS, MAX_IDEAS};
use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use common::{body_bytes, body_json, post_json, send, TestApp};
use serde_json::json;

fn expected_ideas() -> serde_json::Value {
    json!({ "ideas": IDEAS.iter().take(MAX_IDEAS).collect::<Vec<_>>() })
}

#[tokio::test]
async fn prompt_gets_the_first_three_ideas() {
    let response = post_json("/api/assistant", r#"{"prompt": "capsule"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = body_json(response).await;
    assert_eq!(body, expected_ideas());
    assert_eq!(body["ideas"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn answer_does_not_depend_on_prompt_text() {
    let first = body_json(post_json("/api/assistant", r#"{"prompt": "capsule"}"#).await).await;
    let second = body_json(
        post_json("/api/assistant", r#"{"prompt": "uniform for a summer festival"}"#).await,
    )
    .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn blank_prompt_is_rejected() {
    for body in [
        r#"{"prompt": "  "}"#,
        r#"{"prompt": ""}"#,
        r#"{"prompt": null}"#,
        r#"{"prompt": 42}"#,
        r#"{"topic": "capsule"}"#,
        r#"{}"#,
    ] {
        let response = post_json("/api/assistant", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await, json!({"error": "missing_prompt"}), "{body}");
    }
}

#[tokio::test]
async fn malformed_body_is_treated_as_missing_prompt() {
    let response = post_json("/api/assistant", "prompt=capsule").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "missing_prompt"}));
}

#[tokio::test]
async fn json_is_parsed_regardless_of_content_type() {
    let response = send(
        Method::POST,
        "/api/assistant",
        Some("text/plain"),
        r#"{"prompt": "capsule"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, expected_ideas());
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = send(method.clone(), "/api/assistant", None, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(response.headers()[header::ALLOW], "POST", "{method}");
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn large_body_on_wrong_method_still_gets_405() {
    let body = "a".repeat(3 * 1024 * 1024);
    let response = send(Method::GET, "/api/assistant", None, body).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "POST");
}

#[tokio::test]
async fn assistant_over_the_network() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/api/assistant", app.address))
        .json(&json!({"prompt": "merch for a conference"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, expected_ideas());
}
