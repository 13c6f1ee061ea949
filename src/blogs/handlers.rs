use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    blogs::{
        dto::{BlogStats, CreateBlogRequest, UpdateBlogRequest},
        repo::BlogStore,
        repo_types::{Blog, BlogChanges, NewBlog},
        stats,
    },
    error::ApiError,
    extract::AppJson,
    state::AppState,
    users::repo::UserStore,
};

pub const NOT_BLOG_OWNER: &str = "a blog can be deleted only by the user who added the blog";

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/stats", get(blog_stats))
        .route(
            "/blogs/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}

#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, ApiError> {
    let blogs = state.store.list_blogs().await?;
    Ok(Json(blogs))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Blog>, ApiError> {
    state
        .store
        .find_blog(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    let Some(user) = state.store.find_user(user_id).await? else {
        warn!(%user_id, "token refers to unknown user");
        return Err(ApiError::unauthorized());
    };

    let blog = state
        .store
        .insert_blog(NewBlog {
            title: payload.title,
            author: payload.author,
            url: payload.url,
            likes: payload.likes.unwrap_or(0),
            user_id: user.id,
        })
        .await?;
    state.store.append_blog(user.id, blog.id).await?;

    info!(blog_id = %blog.id, user_id = %user.id, "blog created");
    Ok(Json(blog))
}

/// Replaces the content fields of a blog. Anyone may call this: no token and
/// no ownership check, unlike delete.
#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state
        .store
        .update_blog(
            id,
            BlogChanges {
                title: payload.title,
                author: payload.author,
                url: payload.url,
                likes: payload.likes,
            },
        )
        .await?;
    info!(blog_id = %blog.id, "blog updated");
    Ok(Json(blog))
}

#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let blog = state.store.find_blog(id).await?.ok_or(ApiError::NotFound)?;
    if blog.user.id != user_id {
        warn!(blog_id = %id, %user_id, owner_id = %blog.user.id, "delete by non-owner");
        return Err(ApiError::Unauthorized(NOT_BLOG_OWNER.into()));
    }

    state.store.delete_blog(id).await?;
    info!(blog_id = %id, %user_id, "blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, ApiError> {
    let blogs = state.store.list_blogs().await?;
    Ok(Json(BlogStats {
        total_likes: stats::total_likes(&blogs),
        favorite_blog: stats::favorite_blog(&blogs).cloned(),
        most_blogs: stats::most_blogs(&blogs),
        most_likes: stats::most_likes(&blogs),
    }))
}
