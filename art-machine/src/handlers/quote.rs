use axum::{extract::Request, http::Method, Json};
use metrics::counter;
use serde::Serialize;
use service_core::error::AppError;

use crate::payload::Payload;

/// Fields a quote request must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "contact", "product"];

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub status: &'static str,
}

/// Accept a quote request from the site's form, sent as JSON, multipart form
/// data or URL-encoded form fields. Nothing is stored; the request is only
/// checked for the required fields.
///
/// The body is only read once the method has been accepted.
#[tracing::instrument(skip_all)]
pub async fn submit_quote(request: Request) -> Result<Json<QuoteResponse>, AppError> {
    if request.method() != Method::POST {
        return Err(AppError::method_not_allowed(Method::POST));
    }

    let payload = Payload::from_request(request).await;

    let missing = payload.missing(&REQUIRED_FIELDS);
    if !missing.is_empty() {
        tracing::info!(missing = ?missing, "Quote request rejected");
        counter!("quote_submissions_total", "outcome" => "rejected").increment(1);
        return Err(AppError::missing_fields(missing));
    }

    // Contact details stay out of the logs.
    tracing::info!(product = ?payload.get("product"), "Quote request received");
    counter!("quote_submissions_total", "outcome" => "received").increment(1);

    Ok(Json(QuoteResponse { status: "received" }))
}
