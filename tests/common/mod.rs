#![allow(dead_code)]

use axum_test::TestServer;
use keyword_router::infrastructure::persistence::FallbackConfigRepository;
use keyword_router::routes::build_router;
use keyword_router::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;

pub const BASE_URL: &str = "https://router.example";

/// State backed by a memory-only storage adapter.
pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(FallbackConfigRepository::memory_only()), BASE_URL)
}

/// Full API router over a fresh memory store.
pub fn create_test_server() -> TestServer {
    let origins = vec!["http://localhost:4200".to_string()];
    TestServer::new(build_router(create_test_state(), &origins)).unwrap()
}

pub fn config_body(keyword: &str, campaign_type: &str) -> Value {
    json!({
        "keyword": keyword,
        "whiteLink": "https://safe.example",
        "blackLink": format!("https://real.example/{keyword}"),
        "campaignType": campaign_type,
    })
}

/// Creates a configuration and returns the response body.
pub async fn create_config(server: &TestServer, keyword: &str, campaign_type: &str) -> Value {
    let response = server
        .post("/api/configs")
        .json(&config_body(keyword, campaign_type))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}
