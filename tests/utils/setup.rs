use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for `oneshot`

use wingstats::{
    identity::{IdentityConfig, IdentityResolver},
    shared::AppState,
    storage::InMemoryTableStore,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// A fully wired application over an in-memory table, driven through the
/// real router one request at a time
pub struct TestApp {
    state: AppState,
}

impl TestApp {
    /// App with no registered players: every name is standalone
    pub fn new() -> Self {
        Self::with_identity_config("{}")
    }

    /// App with a registered-player configuration in players.json shape
    pub fn with_identity_config(raw: &str) -> Self {
        let config: IdentityConfig = serde_json::from_str(raw).expect("valid identity config");
        let state = AppState::new(
            Arc::new(InMemoryTableStore::new()),
            Arc::new(IdentityResolver::new(config)),
        );
        Self { state }
    }

    fn router(&self) -> Router {
        wingstats::router(self.state.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request("DELETE", uri, None).await
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).unwrap();

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
