//! Submission schema and its field rules.
//!
//! Parsing only ever runs on bytes that already passed signature
//! verification.

pub mod submission;
pub mod validators;

pub use submission::{ApplySubmission, FieldError, SubmissionError, ValidationError};
