//! Lenient request payload parsing.
//!
//! A body that cannot be read or parsed is treated exactly like an empty body:
//! the handlers then report the missing fields instead of a parse error.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};

/// Largest body read for JSON and URL-encoded payloads, matching axum's
/// default extractor limit. Multipart bodies get the same limit from axum.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Parsed request body: a JSON object or the text fields of a form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Parse `body` as a JSON object. Malformed JSON and non-object documents
    /// yield an empty payload.
    pub fn from_json(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Payload(map),
            Ok(other) => {
                tracing::debug!(
                    kind = json_kind(&other),
                    "JSON payload is not an object, treating as empty"
                );
                Payload::default()
            }
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable JSON payload, treating as empty");
                Payload::default()
            }
        }
    }

    /// Parse `body` as `application/x-www-form-urlencoded`. Every field becomes
    /// a JSON string; a repeated key keeps its first value.
    pub fn from_form(body: &[u8]) -> Self {
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
            Ok(pairs) => {
                let mut fields = Map::new();
                for (key, value) in pairs {
                    fields.entry(key).or_insert(Value::String(value));
                }
                Payload(fields)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable form payload, treating as empty");
                Payload::default()
            }
        }
    }

    /// Collect the text fields of a `multipart/form-data` body. File parts are
    /// skipped and a repeated name keeps its first value. A broken stream
    /// yields an empty payload.
    pub async fn from_multipart(mut multipart: Multipart) -> Self {
        let mut fields = Map::new();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "Unparseable multipart payload, treating as empty");
                    return Payload::default();
                }
            };

            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.text().await {
                Ok(text) => {
                    fields.entry(name).or_insert(Value::String(text));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Unreadable multipart field, treating as empty");
                    return Payload::default();
                }
            }
        }

        Payload(fields)
    }

    /// Read a form submission: JSON when the `Content-Type` starts with
    /// `application/json`, multipart fields for `multipart/form-data`, and
    /// URL-encoded fields for anything else.
    pub async fn from_request(request: Request) -> Self {
        let content_type = content_type(request.headers()).to_owned();

        if content_type.starts_with("application/json") {
            Self::from_json(&read_body(request).await)
        } else if content_type.starts_with("multipart/form-data") {
            match Multipart::from_request(request, &()).await {
                Ok(multipart) => Self::from_multipart(multipart).await,
                Err(e) => {
                    tracing::debug!(error = %e, "Malformed multipart request, treating as empty");
                    Payload::default()
                }
            }
        } else {
            Self::from_form(&read_body(request).await)
        }
    }

    /// Read the body as JSON whatever its `Content-Type`.
    pub async fn json_from_request(request: Request) -> Self {
        Self::from_json(&read_body(request).await)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` holds a truthy value: not missing, `null`, `false`, `""`,
    /// zero, `[]` or `{}`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// String value of `key` with surrounding whitespace removed. Missing and
    /// non-string values read as the empty string.
    pub fn trimmed_str(&self, key: &str) -> &str {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
    }

    /// The subset of `required` keys that are not truthy, in `required` order.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|field| !self.has(field))
            .collect()
    }
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Body bytes, or nothing when the body is unreadable or over [`BODY_LIMIT`].
async fn read_body(request: Request) -> Vec<u8> {
    match axum::body::to_bytes(request.into_body(), BODY_LIMIT).await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable request body, treating as empty");
            Vec::new()
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
