use crate::models::{NewPost, Post, PostChanges};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    #[schema(example = "Post title", min_length = 1)]
    pub title: String,

    #[serde(default)]
    #[schema(example = "Post content")]
    pub content: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Same shape as [`CreatePostRequest`] with every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Post title", min_length = 1)]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Post content")]
    pub content: Option<String>,
}

impl From<&UpdatePostRequest> for PostChanges {
    fn from(req: &UpdatePostRequest) -> Self {
        Self {
            title: req.title.clone(),
            content: req.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PostResponse {
    #[schema(example = "665f1c2e8b3f4a1d2c3b4a59")]
    pub id: String,
    #[schema(example = "Post title")]
    pub title: String,
    #[schema(example = "Post content")]
    pub content: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_hex(),
            title: post.title,
            content: post.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePostResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "665f1c2e8b3f4a1d2c3b4a59")]
    pub id: String,
    pub data: CreatePostRequest,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePostResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: UpdatePostRequest,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletePostResponse {
    #[schema(example = true)]
    pub success: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct PageParams {
    /// 1-based page number
    #[validate(range(min = 1, message = "Page index starts at 1"))]
    #[param(example = 1, minimum = 1)]
    pub page_index: u64,

    /// Number of posts per page
    #[validate(range(min = 1, message = "Page size must be at least 1"))]
    #[param(example = 10, minimum = 1)]
    pub page_size: u64,
}

impl PageParams {
    /// Number of posts preceding this page.
    ///
    /// `None` when the offset overflows or exceeds `i64::MAX`, the largest
    /// skip MongoDB accepts.
    pub fn offset(&self) -> Option<u64> {
        self.page_index
            .saturating_sub(1)
            .checked_mul(self.page_size)
            .filter(|skip| i64::try_from(*skip).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        let req = CreatePostRequest {
            title: String::new(),
            content: "body".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn content_is_optional_on_create() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.content, "");
    }

    #[test]
    fn update_rejects_present_but_empty_title() {
        let req = UpdatePostRequest {
            title: Some(String::new()),
            content: None,
        };
        assert!(req.validate().is_err());
        assert!(UpdatePostRequest::default().validate().is_ok());
    }

    #[test]
    fn update_echo_omits_absent_fields() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"content":"C"}"#).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "C" }));
    }

    #[test]
    fn page_offset() {
        let params = PageParams {
            page_index: 3,
            page_size: 10,
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.offset(), Some(20));

        let overflow = PageParams {
            page_index: u64::MAX,
            page_size: 2,
        };
        assert_eq!(overflow.offset(), None);
    }

    #[test]
    fn page_offset_beyond_i64_is_rejected() {
        let params = PageParams {
            page_index: 2,
            page_size: i64::MAX as u64 + 1,
        };
        assert_eq!(params.offset(), None);

        let largest = PageParams {
            page_index: 2,
            page_size: i64::MAX as u64,
        };
        assert_eq!(largest.offset(), Some(i64::MAX as u64));
    }

    #[test]
    fn page_zero_is_rejected() {
        let params = PageParams {
            page_index: 0,
            page_size: 10,
        };
        assert!(params.validate().is_err());
    }
}
