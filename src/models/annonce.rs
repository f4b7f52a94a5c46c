//! Published announcement model.

use serde::{Deserialize, Serialize};

/// A folder-scoped audio file surfaced to end users as a playable item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annonce {
    pub id: String,
    pub title: String,
    pub url: String,
    pub folder_id: Option<String>,
    pub created_at: String,
}

/// Request body for publishing an uploaded file as an announcement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnonceRequest {
    pub title: String,
    /// Id of an existing uploaded-file metadata record.
    pub file_id: String,
}

/// Response body for announcement listings.
#[derive(Debug, Serialize)]
pub struct AnnonceList {
    pub annonces: Vec<Annonce>,
}
