#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use rl_api::AppState;
use rl_core::traits::SubmissionStore;
use rl_db_memory::MemorySubmissionStore;
use rl_db_sqlite::SqliteSubmissionStore;
use tower::ServiceExt;

pub struct TestApp {
    pub name: &'static str,
    pub router: Router,
    pub store: Arc<dyn SubmissionStore>,
}

impl TestApp {
    pub fn new(name: &'static str, store: Arc<dyn SubmissionStore>) -> Self {
        let router = rl_api::router(AppState::new(store.clone()));
        Self { name, router, store }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Posts `body` as `application/x-www-form-urlencoded`.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn assert_redirects_home(&self) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location(), Some("/"));
    }
}

/// One app per store implementation, each starting empty.
pub async fn apps() -> Vec<TestApp> {
    let sqlite = SqliteSubmissionStore::new("sqlite::memory:").await.unwrap();
    vec![
        TestApp::new("memory", Arc::new(MemorySubmissionStore::new())),
        TestApp::new("sqlite", Arc::new(sqlite)),
    ]
}
