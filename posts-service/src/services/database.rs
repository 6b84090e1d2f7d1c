use crate::models::{NewPost, Post, PostChanges};
use crate::services::PostStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::FindOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

const POSTS_COLLECTION: &str = "posts";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn posts(&self) -> Collection<Post> {
        self.db.collection(POSTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn find_sorted(&self, options: FindOptions) -> Result<Vec<Post>, AppError> {
        let cursor = self.posts().find(doc! {}, options).await.map_err(|e| {
            tracing::error!("Failed to query posts: {}", e);
            AppError::from(e)
        })?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl PostStore for MongoDb {
    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        self.find_sorted(options).await
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();
        self.find_sorted(options).await
    }

    async fn insert(&self, post: NewPost) -> Result<Post, AppError> {
        let post = Post::new(post);
        self.posts().insert_one(&post, None).await.map_err(|e| {
            tracing::error!("Failed to insert post: {}", e);
            AppError::from(e)
        })?;
        Ok(post)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, AppError> {
        let post = self
            .posts()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(post_id = %id, "Failed to fetch post: {}", e);
                AppError::from(e)
            })?;
        Ok(post)
    }

    async fn update(&self, id: ObjectId, changes: PostChanges) -> Result<bool, AppError> {
        // An empty $set is rejected by the server
        if changes.is_empty() {
            return Ok(self.find_by_id(id).await?.is_some());
        }

        let update = doc! { "$set": mongodb::bson::to_document(&changes)? };
        let result = self
            .posts()
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| {
                tracing::error!(post_id = %id, "Failed to update post: {}", e);
                AppError::from(e)
            })?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .posts()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(post_id = %id, "Failed to delete post: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
