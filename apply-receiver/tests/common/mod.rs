//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use tower::ServiceExt;

use apply_receiver::{router, AppState, Config};

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";
pub const SUBMISSION_PATH: &str = "/apply/submission";

pub fn app() -> Router {
    router(AppState::new(
        Config::with_secret(TEST_SIGNING_SECRET).unwrap(),
    ))
}

/// `X-Signature-256` value for `raw` under `secret`, computed independently
/// of the crate's own signer.
pub fn sign_with(secret: &str, raw: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(raw);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

pub fn sign(raw: &[u8]) -> String {
    sign_with(TEST_SIGNING_SECRET, raw)
}

pub fn valid_submission_payload() -> Value {
    json!({
        "action_run_link": "https://github.com/you/repo/actions/runs/123",
        "email": "you@example.com",
        "name": "Your Name",
        "repository_link": "https://github.com/you/repo",
        "resume_link": "https://example.com/resume",
        "timestamp": "2026-01-06T16:59:37.571Z",
    })
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn post_submission(raw: Vec<u8>, signature: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(SUBMISSION_PATH)
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Signature-256", signature);
    }
    send(app(), builder.body(Body::from(raw)).unwrap()).await
}

pub fn is_receipt(value: &Value) -> bool {
    value.as_str().map_or(false, |s| {
        s.len() == 36
            && s.starts_with("sub_")
            && s[4..]
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    })
}
