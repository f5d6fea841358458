//! Job-application submission payload.

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

use super::validators::{is_email, is_http_url, is_iso8601};

/// Minimum length of the applicant name, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every rule the payload broke.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("submission failed validation on {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Why a raw body could not become an [`ApplySubmission`].
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The body is not JSON at all.
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Well-formed JSON with the wrong shape or values.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Application submission payload.
///
/// Field names match the JSON keys sent by the caller. Unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplySubmission {
    /// ISO-8601 submission time
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub repository_link: String,
    pub action_run_link: String,
}

impl ApplySubmission {
    /// Parse and validate a raw JSON body.
    pub fn from_slice(raw: &[u8]) -> Result<Self, SubmissionError> {
        let submission: ApplySubmission = serde_json::from_slice(raw).map_err(|e| {
            match e.classify() {
                Category::Data => SubmissionError::Invalid(ValidationError {
                    errors: vec![FieldError::new("body", e.to_string())],
                }),
                Category::Syntax | Category::Eof | Category::Io => {
                    SubmissionError::MalformedJson(e)
                }
            }
        })?;

        submission.validate()?;
        Ok(submission)
    }

    /// Check every field rule, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if !is_iso8601(&self.timestamp) {
            errors.push(FieldError::new(
                "timestamp",
                "The timestamp must be valid ISO 8601",
            ));
        }

        if self.name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("Name must be at least {} characters", MIN_NAME_LEN),
            ));
        }

        if !is_email(&self.email) {
            errors.push(FieldError::new("email", "Must be a valid email address"));
        }

        for (field, value) in [
            ("resume_link", &self.resume_link),
            ("repository_link", &self.repository_link),
            ("action_run_link", &self.action_run_link),
        ] {
            if !is_http_url(value) {
                errors.push(FieldError::new(field, "Must be a valid http or https URL"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn valid_payload() -> Value {
        json!({
            "timestamp": "2026-01-06T16:59:37.571Z",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "resume_link": "https://example.com/resume",
            "repository_link": "https://github.com/jane/repo",
            "action_run_link": "https://github.com/jane/repo/actions/runs/1",
        })
    }

    fn with(field: &str, value: Value) -> Vec<u8> {
        let mut payload = valid_payload();
        payload[field] = value;
        serde_json::to_vec(&payload).unwrap()
    }

    fn invalid_fields(raw: &[u8]) -> Vec<String> {
        match ApplySubmission::from_slice(raw) {
            Err(SubmissionError::Invalid(err)) => {
                err.errors.into_iter().map(|e| e.field).collect()
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_submission() {
        let raw = serde_json::to_vec(&valid_payload()).unwrap();
        let submission = ApplySubmission::from_slice(&raw).unwrap();
        assert_eq!(submission.name, "Jane Doe");
        assert_eq!(submission.email, "jane@example.com");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let raw = with("extra", json!("ignored"));
        assert!(ApplySubmission::from_slice(&raw).is_ok());
    }

    #[test]
    fn test_name_length_boundary() {
        assert_eq!(invalid_fields(&with("name", json!("J"))), vec!["name"]);
        assert!(ApplySubmission::from_slice(&with("name", json!("Jo"))).is_ok());
        // two characters, more than two bytes
        assert!(ApplySubmission::from_slice(&with("name", json!("Zoë"))).is_ok());
    }

    #[test]
    fn test_name_must_be_string() {
        assert_eq!(invalid_fields(&with("name", json!(123))), vec!["body"]);
    }

    #[test]
    fn test_missing_field() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("email");
        let raw = serde_json::to_vec(&payload).unwrap();
        assert_eq!(invalid_fields(&raw), vec!["body"]);
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(
            invalid_fields(&with("email", json!("not-an-email"))),
            vec!["email"]
        );
    }

    #[test]
    fn test_timestamp_invalid() {
        assert_eq!(
            invalid_fields(&with("timestamp", json!("not-a-date"))),
            vec!["timestamp"]
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            invalid_fields(&with("resume_link", json!("ftp://example.com/resume"))),
            vec!["resume_link"]
        );
        assert_eq!(
            invalid_fields(&with("repository_link", json!("https://"))),
            vec!["repository_link"]
        );
        assert_eq!(
            invalid_fields(&with("action_run_link", json!("not a url"))),
            vec!["action_run_link"]
        );
    }

    #[test]
    fn test_all_violations_reported() {
        let raw = serde_json::to_vec(&json!({
            "timestamp": "yesterday",
            "name": "J",
            "email": "nope",
            "resume_link": "ftp://x.com",
            "repository_link": "https://",
            "action_run_link": "https://github.com/jane/repo/actions/runs/1",
        }))
        .unwrap();
        assert_eq!(
            invalid_fields(&raw),
            vec!["timestamp", "name", "email", "resume_link", "repository_link"]
        );
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            ApplySubmission::from_slice(b"not valid json"),
            Err(SubmissionError::MalformedJson(_))
        ));
        assert!(matches!(
            ApplySubmission::from_slice(b""),
            Err(SubmissionError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_wrong_top_level_shape() {
        assert_eq!(invalid_fields(br#"{"wrong":"shape"}"#), vec!["body"]);
        assert_eq!(invalid_fields(b"[1, 2, 3]"), vec!["body"]);
    }
}
