//! Workspace archive download endpoint.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tokio::process::Command;

use crate::auth;
use crate::errors::AppError;
use crate::AppState;

/// Query parameters for the archive download.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// GET /api/download-workspace - Stream a zip of the workspace.
///
/// The token is checked before any filesystem work. `target`, `.git` and
/// the data directories are excluded from the archive.
pub async fn download_workspace(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    if !auth::verify_download_token(
        query.token.as_deref(),
        state.config.download_token.as_deref(),
    ) {
        return Err(AppError::Unauthorized("Invalid download token".to_string()));
    }

    let archive = std::env::temp_dir().join(format!(
        "railops-workspace-{}.zip",
        Utc::now().timestamp_millis()
    ));

    let output = Command::new("zip")
        .arg("-r")
        .arg(&archive)
        .arg(".")
        .args(["-x", "target/*", "-x", ".git/*", "-x", "data/*"])
        .args(["-x", "public/audio/*"])
        .output()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run zip: {}", e)))?;

    if !output.status.success() {
        tokio::fs::remove_file(&archive).await.ok();
        return Err(AppError::Internal(format!(
            "zip exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let bytes = tokio::fs::read(&archive).await?;
    tokio::fs::remove_file(&archive).await.ok();

    tracing::info!(size = bytes.len(), "Workspace archive downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"workspace.zip\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
