//! News post API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{CreateNewsRequest, NewsList, NewsPost};
use crate::AppState;

/// GET /api/news - List all news posts.
pub async fn list_news(State(state): State<AppState>) -> ApiResult<NewsList> {
    let news = state.repo.list_news().await?;
    Ok(Json(NewsList { news }))
}

/// GET /api/news/:id - Get a single news post.
pub async fn get_news(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<NewsPost> {
    match state.repo.get_news(&id).await? {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::NotFound(format!("News post {} not found", id))),
    }
}

/// POST /api/news - Create a news post.
pub async fn create_news(
    State(state): State<AppState>,
    Json(request): Json<CreateNewsRequest>,
) -> ApiResult<NewsPost> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    let post = state.repo.create_news(&request).await?;
    Ok(Json(post))
}

/// DELETE /api/news/:id - Delete a news post.
pub async fn delete_news(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_news(&id).await?;
    Ok(Json(()))
}
