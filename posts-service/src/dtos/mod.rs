pub mod posts;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use posts::{
    CreatePostRequest, CreatePostResponse, DeletePostResponse, PageParams, PostResponse,
    UpdatePostRequest, UpdatePostResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Post not found")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
