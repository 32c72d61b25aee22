/// Common test utilities for integration tests
///
/// Builds the full router over a fresh `MemoryStore`, so these tests need no
/// database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gradebook_api::app::{build_router, AppState};
use gradebook_api::config::Config;
use gradebook_shared::store::memory::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing the app and its backing store
pub struct TestContext {
    pub store: MemoryStore,
    pub app: axum::Router,
}

impl TestContext {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), Config::in_memory());
        let app = build_router(state);

        TestContext { store, app }
    }

    /// Sends a request and returns the status with the parsed JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }
}
