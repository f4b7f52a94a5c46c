//! News post model.

use serde::{Deserialize, Serialize};

/// A news post shown on the public departures board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPost {
    pub id: String,
    pub title: String,
    /// Display date, free-form (e.g. "30.08.2026").
    pub date: String,
    pub content: String,
}

/// Request body for creating a news post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    pub date: String,
    pub content: String,
}

/// Response body for news listings.
#[derive(Debug, Serialize)]
pub struct NewsList {
    pub news: Vec<NewsPost>,
}
