//! Error types for the classification API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
///
/// Remote normalization failures are not represented here: the normalizer
/// recovers them locally and they never reach a response.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Informe o nome da cirurgia.")]
    EmptyTerm,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyTerm => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status(), body).into_response()
    }
}
