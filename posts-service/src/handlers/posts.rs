//! Post CRUD handlers. Each one forwards to a single [`PostStore`] call.
//!
//! [`PostStore`]: crate::services::PostStore

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{
        CreatePostRequest, CreatePostResponse, DeletePostResponse, PageParams, PostResponse,
        UpdatePostRequest, UpdatePostResponse,
    },
    models::PostChanges,
    utils::ValidatedJson,
    AppState,
};

fn parse_post_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid post id: {}", id)))
}

/// List all posts
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "All posts, oldest first", body = [PostResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.store.find_all().await?;
    tracing::debug!(count = posts.len(), "Listed posts");
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// List one page of posts
#[utoipa::path(
    get,
    path = "/posts/{page_index}/{page_size}",
    params(PageParams),
    responses(
        (status = 200, description = "At most page_size posts", body = [PostResponse]),
        (status = 400, description = "Page offset out of range", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_posts_page(
    State(state): State<AppState>,
    Path(params): Path<PageParams>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    params.validate()?;
    let skip = params
        .offset()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Page offset out of range")))?;

    tracing::debug!(
        page_index = params.page_index,
        page_size = params.page_size,
        skip,
        "Listing posts page"
    );

    let posts = state.store.find_page(skip, params.page_size).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = CreatePostResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), AppError> {
    let post = state.store.insert(payload.clone().into()).await?;

    tracing::info!(post_id = %post.id, "Created post");

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            success: true,
            id: post.id.to_hex(),
            data: payload,
        }),
    ))
}

/// Get a post by id
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id (24 hex characters)")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_post_id(&id)?;

    let post = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Post not found")))?;

    Ok(Json(PostResponse::from(post)))
}

/// Update some fields of a post
#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id (24 hex characters)")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Submitted fields merged into the post", body = UpdatePostResponse),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<UpdatePostResponse>, AppError> {
    let id = parse_post_id(&id)?;

    let matched = state.store.update(id, PostChanges::from(&payload)).await?;
    if matched {
        tracing::info!(post_id = %id, "Updated post");
    } else {
        tracing::warn!(post_id = %id, "Update matched no post");
    }

    Ok(Json(UpdatePostResponse {
        success: true,
        data: payload,
    }))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id (24 hex characters)")),
    responses(
        (status = 200, description = "Post removed", body = DeletePostResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletePostResponse>, AppError> {
    let id = parse_post_id(&id)?;

    if state.store.delete(id).await? {
        tracing::info!(post_id = %id, "Deleted post");
    } else {
        tracing::warn!(post_id = %id, "Delete matched no post");
    }

    Ok(Json(DeletePostResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_object_ids() {
        let id = ObjectId::new();
        assert_eq!(parse_post_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_ids() {
        let err = parse_post_id("not-an-id").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
