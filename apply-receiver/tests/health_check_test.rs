//! Integration tests for the info and health routes.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use common::{app, send};

#[tokio::test]
async fn health_returns_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn root_reports_service_and_docs() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"service": "apply-receiver", "docs": "/docs"}));
}

#[tokio::test]
async fn post_to_health_is_not_allowed() {
    let request = Request::builder()
        .method("POST")
        .uri("/health")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
