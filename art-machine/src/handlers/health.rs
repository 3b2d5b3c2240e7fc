use axum::{http::Method, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use service_core::error::AppError;

use crate::SERVICE_NAME;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    /// ISO-8601 UTC, e.g. `2024-05-01T12:00:00.123456+00:00`.
    pub ts: String,
}

/// Liveness probe. Answers GET only.
pub async fn health_check(method: Method) -> Result<Json<HealthResponse>, AppError> {
    if method != Method::GET {
        return Err(AppError::method_not_allowed(Method::GET));
    }

    Ok(Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    }))
}
