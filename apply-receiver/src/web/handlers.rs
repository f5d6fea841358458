//! HTTP endpoint handlers.
//!
//! The submission handler does nothing beyond ordering:
//! 1. Verify the signature over the captured raw body
//! 2. Parse and validate that same body
//! 3. Return a fresh receipt
//!
//! Nothing is stored.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::receipt::Receipt;
use crate::schema::{ApplySubmission, SubmissionError};
use crate::web::capture::RawBody;
use crate::web::signature::{SignatureVerifier, SIGNATURE_HEADER};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: Arc<SignatureVerifier>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let verifier = SignatureVerifier::new(config.signing_secret.clone());
        Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
        }
    }
}

// =============================================================================
// Service Info / Health Check
// =============================================================================

/// Service info response.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub docs: &'static str,
}

/// Root endpoint.
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: state.config.service_name.clone(),
        docs: "/docs",
    })
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Application Submission
// =============================================================================

/// Submission response.
#[derive(Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub receipt: Receipt,
}

/// Signed application submission endpoint.
pub async fn apply_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawBody(raw): RawBody,
) -> Result<Json<SubmissionResponse>, ApiError> {
    info!(body_length = raw.len(), "submission_received");

    // A header that is not visible ASCII is treated the same as a missing one
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(failure) = state.verifier.verify(&raw, signature) {
        warn!(
            reason = failure.reason(),
            has_signature = signature.is_some(),
            "signature_invalid"
        );
        return Err(failure.into());
    }

    info!("signature_verified");

    let submission = ApplySubmission::from_slice(&raw).map_err(|e| {
        match &e {
            SubmissionError::MalformedJson(err) => {
                warn!(error = %err, "submission_malformed_json");
            }
            SubmissionError::Invalid(err) => {
                let fields: Vec<&str> = err.errors.iter().map(|f| f.field.as_str()).collect();
                warn!(fields = ?fields, "submission_invalid");
            }
        }
        ApiError::from(e)
    })?;

    let receipt = Receipt::generate();

    info!(
        receipt = %receipt,
        name_length = submission.name.chars().count(),
        "submission_accepted"
    );

    Ok(Json(SubmissionResponse {
        success: true,
        receipt,
    }))
}
