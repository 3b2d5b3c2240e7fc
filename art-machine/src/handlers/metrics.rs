use axum::{http::StatusCode, response::IntoResponse};
use service_core::observability::render_metrics;

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        render_metrics(),
    )
}
