//! Announcement folder model.

use serde::{Deserialize, Serialize};

/// A folder grouping uploaded announcements. Files point back at the folder
/// via `folderId`; the folder does not embed its files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Request body for creating a folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub name: String,
}

/// Request body for renaming a folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderRequest {
    pub name: String,
}

/// Response body for folder listings.
#[derive(Debug, Serialize)]
pub struct FolderList {
    pub folders: Vec<Folder>,
}
