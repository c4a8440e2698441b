#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tassign_api::config::ServerConfig;
use tassign_api::router::build_app_router;
use tassign_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_matching_sessions: 8,
        session_idle_timeout_secs: 1800,
        session_sweep_interval_secs: 60,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> Router {
    build_app_router(AppState::new(test_config()))
}

/// Build an app whose state the test can also inspect directly.
pub fn build_test_app_with_state(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::new(config);
    (build_app_router(state.clone()), state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Mount a matching session and return its base URI.
pub async fn mount(app: Router) -> String {
    let response = post_json(app, "/api/v1/matching/sessions", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    format!("/api/v1/matching/sessions/{id}")
}
