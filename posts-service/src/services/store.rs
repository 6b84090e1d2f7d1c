use crate::models::{NewPost, Post, PostChanges};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence seam for posts.
///
/// Listing operations return posts ordered by id ascending, which is
/// creation order for store-assigned ids.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Post>, AppError>;

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, AppError>;

    async fn insert(&self, post: NewPost) -> Result<Post, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, AppError>;

    /// Returns whether a post with `id` existed.
    async fn update(&self, id: ObjectId, changes: PostChanges) -> Result<bool, AppError>;

    /// Returns whether a post was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
