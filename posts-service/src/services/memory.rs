use crate::models::{NewPost, Post, PostChanges};
use crate::services::PostStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store for tests and database-less local runs.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, AppError> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, AppError> {
        let post = Post::new(post);
        let mut posts = self.posts.write().await;
        // Keep id order even if ids were minted out of order across tasks
        let at = posts.partition_point(|p| p.id < post.id);
        posts.insert(at, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, AppError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: ObjectId, changes: PostChanges) -> Result<bool, AppError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.apply(&changes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
