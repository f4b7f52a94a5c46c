//! Uploaded audio file metadata.

use serde::{Deserialize, Serialize};

/// Metadata record for one uploaded audio binary.
///
/// The id is derived from the upload time in milliseconds plus a random
/// suffix; collisions are treated as negligible and not deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    /// Original filename as submitted by the client.
    pub name: String,
    /// Public URL the binary is served under (`/audio/<stored-name>`).
    pub url: String,
    pub folder_id: Option<String>,
    pub mime_type: String,
    pub size: u64,
    pub created_at: String,
}

/// Response body for the upload endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub uploaded_files: Vec<UploadedFile>,
}

/// Response body for file-metadata listings.
#[derive(Debug, Serialize)]
pub struct FileList {
    pub files: Vec<UploadedFile>,
}
