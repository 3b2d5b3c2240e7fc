#![allow(dead_code)]

use art_machine::config::ArtMachineConfig;
use art_machine::startup::{build_router, Application};
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use tower::util::ServiceExt;

pub fn test_config() -> ArtMachineConfig {
    ArtMachineConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
        },
        static_dir: None,
        otlp_endpoint: None,
    }
}

pub fn router() -> Router {
    build_router(&test_config())
}

/// Send one request through a fresh router.
pub async fn send(
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }

    router()
        .oneshot(request.body(body.into()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(uri: &str, body: &str) -> Response<Body> {
    send(Method::POST, uri, Some("application/json"), body.to_string()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: ArtMachineConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp { address, port }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::new()
    }
}
