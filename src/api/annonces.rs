//! Published announcement API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{Annonce, AnnonceList, CreateAnnonceRequest};
use crate::AppState;

/// GET /api/annonces - List published announcements.
///
/// A missing store file yields an empty list, never an error.
pub async fn list_annonces(State(state): State<AppState>) -> ApiResult<AnnonceList> {
    let annonces = state.repo.list_annonces().await?;
    Ok(Json(AnnonceList { annonces }))
}

/// POST /api/annonces - Publish an uploaded file as an announcement.
pub async fn create_annonce(
    State(state): State<AppState>,
    Json(request): Json<CreateAnnonceRequest>,
) -> ApiResult<Annonce> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let annonce = state.repo.create_annonce(&request).await?;
    Ok(Json(annonce))
}

/// DELETE /api/annonces/:id - Unpublish an announcement.
pub async fn delete_annonce(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_annonce(&id).await?;
    Ok(Json(()))
}
