use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors surfaced by the search, metrics and export endpoints.
///
/// `TemplateNotFound` and `TemplateInvalid` are configuration problems and
/// abort a search before any network call is made.
#[derive(Debug)]
pub enum ApiError {
    TemplateNotFound(String),
    TemplateInvalid { location: String, reason: String },
    Upstream(String),
    InvalidCriteria(String),
    Calculation(String),
    TableNotFound(String),
    Export(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::TemplateNotFound(location) => {
                write!(f, "no location template for '{location}'")
            }
            ApiError::TemplateInvalid { location, reason } => {
                write!(f, "template for '{location}' is not valid JSON: {reason}")
            }
            ApiError::Upstream(msg) => write!(f, "portal request failed: {msg}"),
            ApiError::InvalidCriteria(msg) => write!(f, "invalid search criteria: {msg}"),
            ApiError::Calculation(msg) => write!(f, "metrics calculation failed: {msg}"),
            ApiError::TableNotFound(table) => write!(f, "no result table '{table}'"),
            ApiError::Export(msg) => write!(f, "spreadsheet export failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::TemplateNotFound(_)
            | ApiError::TemplateInvalid { .. }
            | ApiError::Upstream(_)
            | ApiError::TableNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCriteria(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Calculation(_) => StatusCode::BAD_REQUEST,
            ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
