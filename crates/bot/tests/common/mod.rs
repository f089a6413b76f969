//! In-process status server fixture.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kakaogram_bot::api::create_router;
use kakaogram_bot::state::AppState;
use kakaogram_core::Config;

pub const BOT_USERNAME: &str = "kakaogram_test_bot";
pub const SECRET_TOKEN: &str = "123456:very-secret-token";

/// Response captured from a oneshot request.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response is not JSON")
    }
}

pub struct TestFixture {
    pub router: Router,
}

impl TestFixture {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.telegram.token = SECRET_TOKEN.to_string();
        config.server.enabled = true;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let state = Arc::new(AppState::new(config, BOT_USERNAME));
        Self {
            router: create_router(state),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
