//! Apply Receiver - signed webhook receiver for job-application submissions.
//!
//! Callers POST a JSON submission signed with HMAC-SHA256 over the raw body
//! (`X-Signature-256: sha256=<hex>`). Accepted submissions get back an opaque
//! receipt; nothing is persisted.
//!
//! ## Architecture
//!
//! ```text
//! POST → capture_body (RawBody) → SignatureVerifier → ApplySubmission → Receipt
//! ```

pub mod config;
pub mod error;
pub mod receipt;
pub mod schema;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError, SigningSecret};
pub use error::ApiError;
pub use receipt::Receipt;
pub use schema::ApplySubmission;
pub use web::{router, AppState, AuthFailure, SignatureVerifier};
