//! Request-boundary errors and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::schema::{FieldError, SubmissionError, ValidationError};
use crate::web::signature::AuthFailure;

/// Detail returned for every authentication failure, whatever the reason.
pub const AUTH_FAILURE_DETAIL: &str = "Invalid or missing X-Signature-256";

/// Errors a request handler can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    #[error("request body is not valid JSON")]
    MalformedJson(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("request body could not be read")]
    BodyUnreadable,

    #[error("raw request body was not captured for this route")]
    BodyNotCaptured,
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::MalformedJson(e) => ApiError::MalformedJson(e),
            SubmissionError::Invalid(e) => ApiError::Validation(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::MalformedJson(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyUnreadable => StatusCode::BAD_REQUEST,
            Self::BodyNotCaptured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (detail, errors) = match self {
            Self::Auth(_) => (AUTH_FAILURE_DETAIL.to_string(), Vec::new()),
            Self::MalformedJson(_) => ("Request body is not valid JSON".to_string(), Vec::new()),
            Self::Validation(e) => ("Submission failed validation".to_string(), e.errors),
            Self::PayloadTooLarge { limit } => (
                format!("Request body exceeds {} bytes", limit),
                Vec::new(),
            ),
            Self::BodyUnreadable => ("Failed to read request body".to_string(), Vec::new()),
            Self::BodyNotCaptured => ("Internal server error".to_string(), Vec::new()),
        };

        (status, Json(ErrorResponse { detail, errors })).into_response()
    }
}
