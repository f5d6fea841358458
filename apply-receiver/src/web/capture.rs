//! Raw body capture for the signed submission route.
//!
//! The signature has to be checked against the bytes exactly as they arrived,
//! and the JSON parser has to see those same bytes afterwards. The request
//! body stream can only be consumed once, so this middleware reads it up
//! front, stores it as a [`RawBody`] extension and puts a replay of the same
//! buffer back as the request body.

use axum::{
    async_trait,
    body::{self, Body, Bytes},
    extract::{FromRequestParts, Request, State},
    http::{header::CONTENT_LENGTH, request::Parts, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use tracing::warn;

use crate::error::ApiError;
use crate::web::AppState;

/// The request body as received on the wire.
#[derive(Debug, Clone)]
pub struct RawBody(pub Bytes);

#[async_trait]
impl<S> FromRequestParts<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RawBody>()
            .cloned()
            .ok_or(ApiError::BodyNotCaptured)
    }
}

/// Buffer the body of `POST <submission_path>`; pass everything else through.
pub async fn capture_body(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::POST || req.uri().path() != state.config.submission_path {
        return next.run(req).await;
    }

    let limit = state.config.max_body_bytes;

    let declared_length = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if let Some(len) = declared_length.filter(|len| *len > limit as u64) {
        warn!(declared_length = len, limit = limit, "body_capture_too_large");
        return ApiError::PayloadTooLarge { limit }.into_response();
    }

    let (mut parts, body) = req.into_parts();

    let bytes = match body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let e = e.into_inner();
            if e.downcast_ref::<LengthLimitError>().is_some() {
                warn!(limit = limit, "body_capture_too_large");
                return ApiError::PayloadTooLarge { limit }.into_response();
            }
            warn!(error = %e, "body_capture_read_failed");
            return ApiError::BodyUnreadable.into_response();
        }
    };

    parts.extensions.insert(RawBody(bytes.clone()));
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
