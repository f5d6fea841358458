//! Web server module for the signed submission endpoint.
//!
//! ```text
//! request → capture_body → apply_submission → verify → parse → receipt
//! ```
//!
//! Only `POST <submission_path>` is buffered; the info and health routes are
//! served straight from the request.

pub mod capture;
pub mod handlers;
pub mod signature;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use capture::{capture_body, RawBody};
pub use handlers::{
    apply_submission, health, root, AppState, HealthResponse, ServiceInfo, SubmissionResponse,
};
pub use signature::{AuthFailure, SignatureVerifier, SIGNATURE_HEADER};

/// Build the service router.
pub fn router(state: AppState) -> Router {
    let submission_path = state.config.submission_path.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(&submission_path, post(apply_submission))
        .layer(middleware::from_fn_with_state(state.clone(), capture_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
