//! Audio upload endpoint and file-metadata listing.

use std::path::Path as FsPath;

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{FileList, UploadResponse, UploadedFile};
use crate::AppState;

/// Per-file size cap for audio uploads.
pub const MAX_AUDIO_BYTES: u64 = 10 * 1024 * 1024;

/// One parsed `files` part, held in memory until the batch validates.
struct PendingUpload {
    name: String,
    mime_type: String,
    data: Bytes,
}

/// POST /api/upload-audio - Accept one or more audio files.
///
/// Multipart fields: repeated `files` parts, optional `folderId` text part.
/// The whole batch is validated before any binary touches disk; metadata
/// records are appended in one write after all binaries are stored.
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    let mut folder_id: Option<String> = None;
    let mut pending: Vec<PendingUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("folderId") => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    folder_id = Some(value.trim().to_string());
                }
            }
            Some("files") => {
                let name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let mime_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await?;
                pending.push(PendingUpload {
                    name,
                    mime_type,
                    data,
                });
            }
            _ => {}
        }
    }

    if pending.is_empty() {
        return Err(AppError::Validation("No files submitted".to_string()));
    }

    // The MIME check runs first so unsupported types are rejected
    // regardless of size.
    for upload in &pending {
        if !upload.mime_type.starts_with("audio/") {
            return Err(AppError::Validation(
                "Only audio files are allowed".to_string(),
            ));
        }
    }
    for upload in &pending {
        if upload.data.len() as u64 > MAX_AUDIO_BYTES {
            return Err(AppError::Validation(format!(
                "{} exceeds the 10 MiB limit",
                upload.name
            )));
        }
    }

    let mut uploaded_files = Vec::with_capacity(pending.len());
    for upload in pending {
        let record = store_audio(&state, upload, folder_id.clone()).await?;
        uploaded_files.push(record);
    }

    // Metadata is written after all binaries: a crash in between leaves
    // orphaned binaries, never records without a retrievable payload.
    state.repo.insert_files(&uploaded_files).await?;

    tracing::info!(count = uploaded_files.len(), "Stored audio uploads");
    Ok(Json(UploadResponse { uploaded_files }))
}

/// Write one binary under a generated name and build its metadata record.
async fn store_audio(
    state: &AppState,
    upload: PendingUpload,
    folder_id: Option<String>,
) -> Result<UploadedFile, AppError> {
    // Upload-time id plus a random suffix so same-named uploads never
    // overwrite each other.
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let id = format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8]);

    let stored_name = match FsPath::new(&upload.name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.clone(),
    };

    // Self-heal a removed audio directory before writing.
    tokio::fs::create_dir_all(&state.config.audio_dir).await?;
    tokio::fs::write(state.config.audio_dir.join(&stored_name), &upload.data).await?;

    Ok(UploadedFile {
        id,
        name: upload.name,
        url: format!("/audio/{}", stored_name),
        folder_id,
        mime_type: upload.mime_type,
        size: upload.data.len() as u64,
        created_at: Utc::now().to_rfc3339(),
    })
}

/// Query parameters for the file-metadata listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesQuery {
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// GET /api/files - List uploaded-file metadata, optionally per folder.
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FilesQuery>,
) -> ApiResult<FileList> {
    let files = state.repo.list_files(query.folder_id.as_deref()).await?;
    Ok(Json(FileList { files }))
}
