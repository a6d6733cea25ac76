//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body};

use groupmail::api::AppState;
use groupmail::api::app;
use groupmail::core::AppConfig;

/// Config pointing every upstream at the given (usually mockito) URLs.
pub fn test_config(gmail_api_url: &str, oauth_token_url: &str, static_dir: &str) -> AppConfig {
    AppConfig {
        host: String::from("127.0.0.1"),
        port: String::from("0"),
        static_dir: static_dir.to_string(),
        gmail_api_url: gmail_api_url.to_string(),
        oauth_token_url: oauth_token_url.to_string(),
        gmail_api_client_id: String::from("test_client_id"),
        gmail_api_client_secret: String::from("test_client_secret"),
        gmail_api_redirect_uri: String::from("http://localhost:3000/callback"),
        recent_max_results: 20,
        max_in_flight: 4,
    }
}

/// Creates a test application router whose upstreams are the given URLs.
pub fn test_app(gmail_api_url: &str, oauth_token_url: &str) -> Router {
    test_app_with_config(test_config(
        gmail_api_url,
        oauth_token_url,
        "./does-not-exist",
    ))
}

pub fn test_app_with_config(config: AppConfig) -> Router {
    app(Arc::new(AppState::new(config)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body is not JSON")
}
