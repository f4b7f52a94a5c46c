//! Repository for CRUD operations over the JSON stores.
//!
//! Every mutation is a locked read-modify-write followed by a write to a
//! sibling temp file and a rename, so concurrent writers serialize instead
//! of losing updates.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{
    Annonce, CreateAnnonceRequest, CreateFolderRequest, CreateNewsRequest, CreateScheduleRequest,
    Folder, NewsPost, RenameFolderRequest, Schedule, UpdateScheduleRequest, UploadedFile,
};

use super::StorePaths;

/// Read a JSON store, treating a missing file as the empty default.
async fn read_store<T: DeserializeOwned + Default>(path: &Path) -> Result<T, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(err) => Err(err.into()),
    }
}

/// Persist a JSON store atomically: write a sibling temp file, then rename.
async fn write_store<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    // Self-heal a removed parent directory before writing.
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Repository for all data operations.
///
/// One mutex per store file; the only method touching several stores is
/// `delete_folder`, which takes them in declaration order.
pub struct Repository {
    paths: StorePaths,
    schedules: Mutex<()>,
    folders: Mutex<()>,
    metadata: Mutex<()>,
    annonces: Mutex<()>,
    news: Mutex<()>,
}

impl Repository {
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            schedules: Mutex::new(()),
            folders: Mutex::new(()),
            metadata: Mutex::new(()),
            annonces: Mutex::new(()),
            news: Mutex::new(()),
        }
    }

    // ==================== SCHEDULE OPERATIONS ====================

    /// List all schedules in store order.
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, AppError> {
        read_store(&self.paths.schedules).await
    }

    /// Create a new schedule.
    pub async fn create_schedule(
        &self,
        request: &CreateScheduleRequest,
    ) -> Result<Schedule, AppError> {
        let schedule = Schedule {
            id: uuid::Uuid::new_v4().to_string(),
            train_number: request.train_number.clone(),
            departure: request.departure.clone(),
            arrival: request.arrival.clone(),
            track: request.track.clone(),
            delay_minutes: request.delay_minutes,
            is_cancelled: request.is_cancelled,
        };

        let _guard = self.schedules.lock().await;
        let mut schedules: Vec<Schedule> = read_store(&self.paths.schedules).await?;
        schedules.push(schedule.clone());
        write_store(&self.paths.schedules, &schedules).await?;

        Ok(schedule)
    }

    /// Merge the given fields into the matching schedule and persist.
    pub async fn update_schedule(
        &self,
        id: &str,
        request: &UpdateScheduleRequest,
    ) -> Result<Schedule, AppError> {
        let _guard = self.schedules.lock().await;
        let mut schedules: Vec<Schedule> = read_store(&self.paths.schedules).await?;

        let schedule = schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;

        if let Some(train_number) = &request.train_number {
            schedule.train_number = train_number.clone();
        }
        if let Some(departure) = &request.departure {
            schedule.departure = departure.clone();
        }
        if let Some(arrival) = &request.arrival {
            schedule.arrival = arrival.clone();
        }
        if let Some(track) = &request.track {
            schedule.track = Some(track.clone());
        }
        if let Some(delay_minutes) = request.delay_minutes {
            schedule.delay_minutes = delay_minutes;
        }
        if let Some(is_cancelled) = request.is_cancelled {
            schedule.is_cancelled = is_cancelled;
        }

        let updated = schedule.clone();
        write_store(&self.paths.schedules, &schedules).await?;

        Ok(updated)
    }

    /// Clear delay and cancellation on every schedule. Idempotent.
    pub async fn reset_schedules(&self) -> Result<Vec<Schedule>, AppError> {
        let _guard = self.schedules.lock().await;
        let mut schedules: Vec<Schedule> = read_store(&self.paths.schedules).await?;

        for schedule in &mut schedules {
            schedule.delay_minutes = 0;
            schedule.is_cancelled = false;
        }

        write_store(&self.paths.schedules, &schedules).await?;
        Ok(schedules)
    }

    // ==================== FOLDER OPERATIONS ====================

    /// List all folders.
    pub async fn list_folders(&self) -> Result<Vec<Folder>, AppError> {
        read_store(&self.paths.folders).await
    }

    /// Create a new folder.
    pub async fn create_folder(&self, request: &CreateFolderRequest) -> Result<Folder, AppError> {
        let folder = Folder {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        let _guard = self.folders.lock().await;
        let mut folders: Vec<Folder> = read_store(&self.paths.folders).await?;
        folders.push(folder.clone());
        write_store(&self.paths.folders, &folders).await?;

        Ok(folder)
    }

    /// Rename a folder.
    pub async fn rename_folder(
        &self,
        id: &str,
        request: &RenameFolderRequest,
    ) -> Result<Folder, AppError> {
        let _guard = self.folders.lock().await;
        let mut folders: Vec<Folder> = read_store(&self.paths.folders).await?;

        let folder = folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Folder {} not found", id)))?;

        folder.name = request.name.clone();
        let renamed = folder.clone();
        write_store(&self.paths.folders, &folders).await?;

        Ok(renamed)
    }

    /// Delete a folder. Files and announcements that referenced it become
    /// unfiled (their `folderId` is cleared), not deleted.
    pub async fn delete_folder(&self, id: &str) -> Result<(), AppError> {
        let _folders_guard = self.folders.lock().await;
        let mut folders: Vec<Folder> = read_store(&self.paths.folders).await?;

        let before = folders.len();
        folders.retain(|f| f.id != id);
        if folders.len() == before {
            return Err(AppError::NotFound(format!("Folder {} not found", id)));
        }
        write_store(&self.paths.folders, &folders).await?;

        {
            let _guard = self.metadata.lock().await;
            let mut metadata: BTreeMap<String, UploadedFile> =
                read_store(&self.paths.metadata).await?;
            let mut changed = false;
            for record in metadata.values_mut() {
                if record.folder_id.as_deref() == Some(id) {
                    record.folder_id = None;
                    changed = true;
                }
            }
            if changed {
                write_store(&self.paths.metadata, &metadata).await?;
            }
        }

        {
            let _guard = self.annonces.lock().await;
            let mut annonces: Vec<Annonce> = read_store(&self.paths.annonces).await?;
            let mut changed = false;
            for annonce in &mut annonces {
                if annonce.folder_id.as_deref() == Some(id) {
                    annonce.folder_id = None;
                    changed = true;
                }
            }
            if changed {
                write_store(&self.paths.annonces, &annonces).await?;
            }
        }

        Ok(())
    }

    // ==================== UPLOADED FILE OPERATIONS ====================

    /// List uploaded-file metadata, optionally scoped to one folder.
    pub async fn list_files(&self, folder_id: Option<&str>) -> Result<Vec<UploadedFile>, AppError> {
        let metadata: BTreeMap<String, UploadedFile> = read_store(&self.paths.metadata).await?;

        let files = metadata
            .into_values()
            .filter(|f| folder_id.is_none() || f.folder_id.as_deref() == folder_id)
            .collect();

        Ok(files)
    }

    /// Get one uploaded-file metadata record.
    pub async fn get_file(&self, id: &str) -> Result<Option<UploadedFile>, AppError> {
        let metadata: BTreeMap<String, UploadedFile> = read_store(&self.paths.metadata).await?;
        Ok(metadata.get(id).cloned())
    }

    /// Append a batch of metadata records in one locked write.
    pub async fn insert_files(&self, records: &[UploadedFile]) -> Result<(), AppError> {
        let _guard = self.metadata.lock().await;
        let mut metadata: BTreeMap<String, UploadedFile> = read_store(&self.paths.metadata).await?;

        for record in records {
            metadata.insert(record.id.clone(), record.clone());
        }

        write_store(&self.paths.metadata, &metadata).await
    }

    // ==================== ANNOUNCEMENT OPERATIONS ====================

    /// List published announcements. A missing store file is an empty list.
    pub async fn list_annonces(&self) -> Result<Vec<Annonce>, AppError> {
        read_store(&self.paths.annonces).await
    }

    /// Publish an uploaded file as an announcement under a title.
    pub async fn create_annonce(
        &self,
        request: &CreateAnnonceRequest,
    ) -> Result<Annonce, AppError> {
        let file = self.get_file(&request.file_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Uploaded file {} not found", request.file_id))
        })?;

        let annonce = Annonce {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title.clone(),
            url: file.url,
            folder_id: file.folder_id,
            created_at: Utc::now().to_rfc3339(),
        };

        let _guard = self.annonces.lock().await;
        let mut annonces: Vec<Annonce> = read_store(&self.paths.annonces).await?;
        annonces.push(annonce.clone());
        write_store(&self.paths.annonces, &annonces).await?;

        Ok(annonce)
    }

    /// Unpublish an announcement. The underlying file is untouched.
    pub async fn delete_annonce(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.annonces.lock().await;
        let mut annonces: Vec<Annonce> = read_store(&self.paths.annonces).await?;

        let before = annonces.len();
        annonces.retain(|a| a.id != id);
        if annonces.len() == before {
            return Err(AppError::NotFound(format!("Annonce {} not found", id)));
        }

        write_store(&self.paths.annonces, &annonces).await
    }

    // ==================== NEWS OPERATIONS ====================

    /// List all news posts.
    pub async fn list_news(&self) -> Result<Vec<NewsPost>, AppError> {
        read_store(&self.paths.news).await
    }

    /// Get a news post by ID.
    pub async fn get_news(&self, id: &str) -> Result<Option<NewsPost>, AppError> {
        let news: Vec<NewsPost> = read_store(&self.paths.news).await?;
        Ok(news.into_iter().find(|n| n.id == id))
    }

    /// Create a news post.
    pub async fn create_news(&self, request: &CreateNewsRequest) -> Result<NewsPost, AppError> {
        let post = NewsPost {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title.clone(),
            date: request.date.clone(),
            content: request.content.clone(),
        };

        let _guard = self.news.lock().await;
        let mut news: Vec<NewsPost> = read_store(&self.paths.news).await?;
        news.push(post.clone());
        write_store(&self.paths.news, &news).await?;

        Ok(post)
    }

    /// Delete a news post.
    pub async fn delete_news(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.news.lock().await;
        let mut news: Vec<NewsPost> = read_store(&self.paths.news).await?;

        let before = news.len();
        news.retain(|n| n.id != id);
        if news.len() == before {
            return Err(AppError::NotFound(format!("News post {} not found", id)));
        }

        write_store(&self.paths.news, &news).await
    }
}
