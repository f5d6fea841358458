//! Configuration module for environment variable parsing.
//!
//! `SIGNING_SECRET` is mandatory; every other setting falls back to a default
//! (with a warning) when it is absent or unparseable.

use std::env;
use std::fmt;

use thiserror::Error;
use tracing::warn;

/// Default path of the signed submission route.
pub const DEFAULT_SUBMISSION_PATH: &str = "/apply/submission";

/// Default cap on a captured request body (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Routes the submission path may not replace.
const RESERVED_PATHS: &[&str] = &["/", "/health"];

/// Errors that prevent the service from starting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SIGNING_SECRET is not set")]
    MissingSigningSecret,

    #[error("SIGNING_SECRET is empty")]
    EmptySigningSecret,

    #[error("SUBMISSION_PATH must be a literal path starting with '/' that does not shadow another route, got {0:?}")]
    InvalidSubmissionPath(String),
}

/// Shared HMAC key. `Debug` never prints the key material.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySigningSecret);
        }
        Ok(Self(secret.into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Key used to verify `X-Signature-256`
    pub signing_secret: SigningSecret,

    /// Path of the signed submission route
    pub submission_path: String,

    /// Largest request body the capture stage will buffer
    pub max_body_bytes: usize,

    /// Name reported by `GET /`
    pub service_name: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_secret = lookup("SIGNING_SECRET")
            .ok_or(ConfigError::MissingSigningSecret)
            .and_then(SigningSecret::new)?;

        let submission_path = lookup("SUBMISSION_PATH")
            .map(|p| p.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SUBMISSION_PATH.to_string());
        if !is_literal_path(&submission_path) || RESERVED_PATHS.contains(&submission_path.as_str()) {
            return Err(ConfigError::InvalidSubmissionPath(submission_path));
        }

        Ok(Config {
            port: parse_or_default(&lookup, "PORT", 8080),

            signing_secret,

            submission_path,

            max_body_bytes: parse_or_default(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),

            service_name: lookup("SERVICE_NAME")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "apply-receiver".to_string()),
        })
    }

    /// Configuration with every optional setting at its default.
    pub fn with_secret(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        Self::from_lookup(|name| (name == "SIGNING_SECRET").then(|| secret.clone()))
    }
}

/// An absolute path with no route parameters or wildcards.
///
/// The capture stage matches the path literally, so a pattern segment would
/// route requests that are never captured.
fn is_literal_path(path: &str) -> bool {
    path.starts_with('/')
        && path
            .split('/')
            .all(|segment| !segment.starts_with(':') && !segment.starts_with('*'))
}

/// Parse an optional variable, warning and falling back on bad input.
fn parse_or_default<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = match lookup(name) {
        Some(v) => v,
        None => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}
