//! Shared helpers for posts-service integration tests.
//!
//! Requests are driven through the router in-process with
//! `tower::ServiceExt::oneshot` against an in-memory post store, or against
//! [`UnreachableStore`] when a test needs the store to be down.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use posts_service::{
    build_router,
    config::PostsConfig,
    models::{NewPost, Post, PostChanges},
    services::{InMemoryPostStore, PostStore},
    AppState,
};
use serde_json::Value;
use service_core::error::AppError;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn PostStore>,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_config(PostsConfig::for_memory_store())
    }

    pub fn with_config(config: PostsConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryPostStore::new()))
    }

    pub fn with_store(config: PostsConfig, store: Arc<dyn PostStore>) -> Self {
        let state = AppState {
            config,
            store: store.clone(),
        };

        TestApp {
            router: build_router(state),
            store,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a post and return its id.
    pub async fn create_post(&self, title: &str, content: &str) -> String {
        let (status, body) = self
            .post_json(
                "/posts",
                serde_json::json!({ "title": title, "content": content }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
        body["id"]
            .as_str()
            .expect("Create response is missing id")
            .to_string()
    }
}

/// Store whose backend is never reachable; every call fails.
pub struct UnreachableStore;

impl UnreachableStore {
    fn error() -> AppError {
        AppError::DatabaseError(anyhow::anyhow!("connection refused"))
    }
}

#[async_trait]
impl PostStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        Err(Self::error())
    }

    async fn find_page(&self, _skip: u64, _limit: u64) -> Result<Vec<Post>, AppError> {
        Err(Self::error())
    }

    async fn insert(&self, _post: NewPost) -> Result<Post, AppError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Post>, AppError> {
        Err(Self::error())
    }

    async fn update(&self, _id: ObjectId, _changes: PostChanges) -> Result<bool, AppError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: ObjectId) -> Result<bool, AppError> {
        Err(Self::error())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(Self::error())
    }
}
