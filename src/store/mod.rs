//! JSON-file persistence layer.
//!
//! Flat JSON documents on disk are the source of truth for all application data.

mod repository;

pub use repository::*;

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Resolved locations of every store file.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub schedules: PathBuf,
    pub folders: PathBuf,
    pub annonces: PathBuf,
    pub news: PathBuf,
    /// Uploaded-file metadata map, kept next to the binaries
    pub metadata: PathBuf,
    pub audio_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: &Path, audio_dir: &Path) -> Self {
        Self {
            schedules: data_dir.join("schedules.json"),
            folders: data_dir.join("folders.json"),
            annonces: data_dir.join("annonces.json"),
            news: data_dir.join("news.json"),
            metadata: audio_dir.join("metadata.json"),
            audio_dir: audio_dir.to_path_buf(),
        }
    }
}

/// Ensure the data and audio directories exist.
///
/// Missing store files are not created here. Readers treat an absent file
/// as an empty store and the first write creates it.
pub async fn init_store(config: &Config) -> Result<StorePaths, std::io::Error> {
    tokio::fs::create_dir_all(&config.data_dir).await?;
    tokio::fs::create_dir_all(&config.audio_dir).await?;
    Ok(StorePaths::new(&config.data_dir, &config.audio_dir))
}
