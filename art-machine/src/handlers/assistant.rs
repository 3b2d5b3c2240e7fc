use axum::{extract::Request, http::Method, Json};
use metrics::counter;
use serde::Serialize;
use service_core::error::AppError;

use crate::payload::Payload;

/// Canned suggestions returned for every accepted prompt.
pub static IDEAS: &[&str] = &[
    "Подбор капсулы из трёх позиций с акцентом на брендовые цвета",
    "Совет по материалам для летней униформы с учётом интенсивной носки",
    "План запуска мерча к событию с чек-листом производства",
];

/// Upper bound on the number of ideas in one answer.
pub const MAX_IDEAS: usize = 3;

#[derive(Debug, Serialize)]
pub struct IdeasResponse {
    pub ideas: Vec<&'static str>,
}

/// Suggest merch ideas for a prompt.
///
/// The prompt must be a non-blank string but its text does not affect the
/// answer: every accepted prompt gets the same first [`MAX_IDEAS`] entries of
/// [`IDEAS`]. The body is read as JSON whatever its `Content-Type`, and only
/// once the method has been accepted.
#[tracing::instrument(skip_all)]
pub async fn suggest_ideas(request: Request) -> Result<Json<IdeasResponse>, AppError> {
    if request.method() != Method::POST {
        return Err(AppError::method_not_allowed(Method::POST));
    }

    let payload = Payload::json_from_request(request).await;

    let prompt = payload.trimmed_str("prompt");
    if prompt.is_empty() {
        counter!("assistant_requests_total", "outcome" => "rejected").increment(1);
        return Err(AppError::validation("missing_prompt"));
    }

    tracing::info!(prompt_chars = prompt.chars().count(), "Assistant prompt accepted");
    counter!("assistant_requests_total", "outcome" => "answered").increment(1);

    Ok(Json(IdeasResponse {
        ideas: IDEAS.iter().copied().take(MAX_IDEAS).collect(),
    }))
}
