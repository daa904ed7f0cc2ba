//! HTTP client for integration testing.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`, no
//! socket involved.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use server_core::kernel::TestDependencies;
use server_core::server::{build_app, AppState};
use tower::ServiceExt;

/// Result of one request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// In-process client for the application router.
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Router over in-memory dependencies (no database).
    pub fn from_deps(deps: TestDependencies) -> Self {
        let state = AppState::new(deps.into_server_deps_without_db(), "Mall Chatbot");
        Self::new(build_app(state))
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST a JSON body with optional credential and origin headers.
    pub async fn post(
        &self,
        path: &str,
        credential: Option<&str>,
        origin: Option<&str>,
        body: Value,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header("content-type", "application/json");
        if let Some(key) = credential {
            builder = builder.header("x-api-key", key);
        }
        if let Some(origin) = origin {
            builder = builder.header("origin", origin);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }
}
