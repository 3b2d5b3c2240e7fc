use axum::{
    Json,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The handler only answers `allow`; the response carries no body.
    #[error("Method not allowed, expected {allow}")]
    MethodNotAllowed { allow: Method },

    /// Request payload failed a presence check. `code` is the machine-readable
    /// error string; `fields` lists the offending payload keys, if any.
    #[error("Validation error: {code}")]
    Validation {
        code: &'static str,
        fields: Option<Vec<&'static str>>,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn method_not_allowed(allow: Method) -> Self {
        AppError::MethodNotAllowed { allow }
    }

    pub fn validation(code: &'static str) -> Self {
        AppError::Validation { code, fields: None }
    }

    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        AppError::Validation {
            code: "missing_fields",
            fields: Some(fields),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<&'static str>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MethodNotAllowed { allow } => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allow.as_str())],
            )
                .into_response(),
            AppError::Validation { code, fields } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: code,
                    fields,
                }),
            )
                .into_response(),
            AppError::InternalError(err) | AppError::ConfigError(err) => {
                tracing::error!(error = %format!("{:#}", err), "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal_error",
                        fields: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}
