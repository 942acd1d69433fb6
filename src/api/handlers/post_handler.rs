//! Post resource handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Post;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Post create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostPayload {
    /// Post title
    #[validate(length(min = 1, max = 160, message = "Title is required and may not exceed 160 characters"))]
    #[schema(example = "Hello world")]
    pub title: String,
    /// Post body
    #[validate(length(min = 1, message = "Content is required"))]
    #[schema(example = "This is my first post.")]
    pub content: String,
}

/// Create post resource routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/:id", get(show).put(update).delete(destroy))
}

/// List the authenticated user's posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Posts owned by the current user", body = Vec<Post>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn index(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = state.post_service.list(current_user.id).await?;

    Ok(Json(posts))
}

/// Create a new post owned by the current user
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = PostPayload,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error, field -> messages map")
    )
)]
pub async fn store(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PostPayload>,
) -> AppResult<(StatusCode, Json<Post>)> {
    let post = state
        .post_service
        .create(current_user.id, payload.title, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Fetch a single post
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Post is owned by another user"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn show(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Post>> {
    let post = state.post_service.get(current_user.id, id).await?;

    Ok(Json(post))
}

/// Overwrite a post's title and content
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    request_body = PostPayload,
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Post is owned by another user"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Validation error, field -> messages map")
    )
)]
pub async fn update(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PostPayload>,
) -> AppResult<Json<Post>> {
    let post = state
        .post_service
        .update(current_user.id, id, payload.title, payload.content)
        .await?;

    Ok(Json(post))
}

/// Delete a post by id
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn destroy(
    Extension(_current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.post_service.delete(id).await?;

    Ok(Json(MessageResponse::new("This post has been deleted")))
}
