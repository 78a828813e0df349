#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use biztime::{app, AppState, MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

/// Full router over a fresh in-memory store.
pub fn test_app() -> Router {
    app(AppState::new(MemoryStore::new()), BODY_LIMIT)
}

/// Send one request and return the status with the parsed JSON body (`Value::Null` when empty or not JSON).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Create a company and return its derived code.
pub async fn seed_company(app: &Router, name: &str, description: &str) -> String {
    let (status, body) = post(
        app,
        "/companies",
        serde_json::json!({ "name": name, "description": description }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seed company failed: {body}");
    body["company"]["code"].as_str().unwrap().to_string()
}

/// Create an invoice and return its id.
pub async fn seed_invoice(app: &Router, comp_code: &str, amt: f64) -> i64 {
    let (status, body) = post(
        app,
        "/invoices",
        serde_json::json!({ "comp_code": comp_code, "amt": amt }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "seed invoice failed: {body}");
    body["invoice"]["id"].as_i64().unwrap()
}
