//! Folder API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{CreateFolderRequest, Folder, FolderList, RenameFolderRequest};
use crate::AppState;

/// GET /api/folders - List all folders.
pub async fn list_folders(State(state): State<AppState>) -> ApiResult<FolderList> {
    let folders = state.repo.list_folders().await?;
    Ok(Json(FolderList { folders }))
}

/// POST /api/folders - Create a new folder.
pub async fn create_folder(
    State(state): State<AppState>,
    Json(request): Json<CreateFolderRequest>,
) -> ApiResult<Folder> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Folder name is required".to_string()));
    }

    let folder = state.repo.create_folder(&request).await?;
    Ok(Json(folder))
}

/// PUT /api/folders/:id - Rename a folder.
pub async fn rename_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RenameFolderRequest>,
) -> ApiResult<Folder> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Folder name is required".to_string()));
    }

    let folder = state.repo.rename_folder(&id, &request).await?;
    Ok(Json(folder))
}

/// DELETE /api/folders/:id - Delete a folder. Contained files become unfiled.
pub async fn delete_folder(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_folder(&id).await?;
    Ok(Json(()))
}
