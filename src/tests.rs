//! Integration tests for the railops backend.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::store::{init_store, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_download_token(None).await
    }

    async fn with_download_token(token: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            audio_dir: temp_dir.path().join("audio"),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            download_token: token,
            log_level: "warn".to_string(),
        };

        let paths = init_store(&config).await.expect("Failed to init store");
        let repo = Arc::new(Repository::new(paths));

        let state = AppState {
            repo,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_schedule(&self, train_number: &str, delay: u32) -> Value {
        let resp = self
            .client
            .post(self.url("/api/schedules"))
            .json(&json!({
                "trainNumber": train_number,
                "departure": "Lausanne",
                "arrival": "Geneva",
                "track": "4",
                "delayMinutes": delay
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }

    async fn upload_audio(&self, filename: &str, mime: &str, folder_id: Option<&str>) -> reqwest::Response {
        let part = Part::bytes(b"fake audio payload".to_vec())
            .file_name(filename.to_string())
            .mime_str(mime)
            .unwrap();
        let mut form = Form::new().part("files", part);
        if let Some(folder_id) = folder_id {
            form = form.text("folderId", folder_id.to_string());
        }

        self.client
            .post(self.url("/api/upload-audio"))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_annonces_empty_when_store_file_missing() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/annonces"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["annonces"], json!([]));
}

#[tokio::test]
async fn test_schedule_update_changes_exactly_one_record() {
    let fixture = TestFixture::new().await;

    let first = fixture.create_schedule("ICE 702", 0).await;
    let second = fixture.create_schedule("RE 18", 0).await;
    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    let update_resp = fixture
        .client
        .patch(fixture.url(&format!("/api/schedules/{}", first_id)))
        .json(&json!({ "delayMinutes": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let updated: Value = update_resp.json().await.unwrap();
    assert_eq!(updated["delayMinutes"], 5);
    // Untouched fields survive the merge
    assert_eq!(updated["trainNumber"], "ICE 702");
    assert_eq!(updated["track"], "4");

    let list_resp = fixture
        .client
        .get(fixture.url("/api/schedules"))
        .send()
        .await
        .unwrap();
    let list: Value = list_resp.json().await.unwrap();
    let schedules = list["schedules"].as_array().unwrap();
    assert_eq!(schedules.len(), 2);

    for schedule in schedules {
        let expected = if schedule["id"] == first_id { 5 } else { 0 };
        assert_eq!(schedule["delayMinutes"], expected);
        assert_eq!(schedule["isCancelled"], false);
    }
    assert!(schedules.iter().any(|s| s["id"] == second_id));
}

#[tokio::test]
async fn test_schedule_update_unknown_id_is_404() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .patch(fixture.url("/api/schedules/no-such-id"))
        .json(&json!({ "delayMinutes": 5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_schedule_reset_is_idempotent() {
    let fixture = TestFixture::new().await;

    let schedule = fixture.create_schedule("IR 90", 25).await;
    let id = schedule["id"].as_str().unwrap();

    fixture
        .client
        .patch(fixture.url(&format!("/api/schedules/{}", id)))
        .json(&json!({ "isCancelled": true }))
        .send()
        .await
        .unwrap();

    let first_reset: Value = fixture
        .client
        .post(fixture.url("/api/schedules/reset"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second_reset: Value = fixture
        .client
        .post(fixture.url("/api/schedules/reset"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first_reset, second_reset);
    for schedule in first_reset["schedules"].as_array().unwrap() {
        assert_eq!(schedule["delayMinutes"], 0);
        assert_eq!(schedule["isCancelled"], false);
    }
}

#[tokio::test]
async fn test_schedule_validation_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/schedules"))
        .json(&json!({
            "trainNumber": "",
            "departure": "Lausanne",
            "arrival": "Geneva"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_rejects_non_audio() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .upload_audio("notes.txt", "text/plain", None)
        .await;

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Only audio files are allowed");
}

#[tokio::test]
async fn test_upload_rejects_oversize_audio() {
    let fixture = TestFixture::new().await;

    let part = Part::bytes(vec![0u8; 10 * 1024 * 1024 + 1])
        .file_name("long.wav")
        .mime_str("audio/wav")
        .unwrap();
    let resp = fixture
        .client
        .post(fixture.url("/api/upload-audio"))
        .multipart(Form::new().part("files", part))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_records_submitted_folder_id() {
    let fixture = TestFixture::new().await;

    let folder: Value = fixture
        .client
        .post(fixture.url("/api/folders"))
        .json(&json!({ "name": "Departures" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let folder_id = folder["id"].as_str().unwrap();

    let resp = fixture
        .upload_audio("chime.mp3", "audio/mpeg", Some(folder_id))
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    let files = body["uploadedFiles"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["folderId"], folder_id);
    assert_eq!(files[0]["name"], "chime.mp3");
    assert_eq!(files[0]["mimeType"], "audio/mpeg");
    assert!(files[0]["size"].as_u64().unwrap() > 0);

    // The binary is retrievable under its public URL
    let url = files[0]["url"].as_str().unwrap();
    let audio_resp = fixture.client.get(fixture.url(url)).send().await.unwrap();
    assert_eq!(audio_resp.status(), 200);
    assert_eq!(
        audio_resp.bytes().await.unwrap().as_ref(),
        b"fake audio payload"
    );
}

#[tokio::test]
async fn test_upload_without_folder_is_unfiled() {
    let fixture = TestFixture::new().await;

    let resp = fixture.upload_audio("jingle.ogg", "audio/ogg", None).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    let files = body["uploadedFiles"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["folderId"].is_null());
}

#[tokio::test]
async fn test_files_listing_scoped_by_folder() {
    let fixture = TestFixture::new().await;

    let folder: Value = fixture
        .client
        .post(fixture.url("/api/folders"))
        .json(&json!({ "name": "Platform 3" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let folder_id = folder["id"].as_str().unwrap();

    fixture
        .upload_audio("filed.mp3", "audio/mpeg", Some(folder_id))
        .await;
    fixture.upload_audio("loose.mp3", "audio/mpeg", None).await;

    let all: Value = fixture
        .client
        .get(fixture.url("/api/files"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["files"].as_array().unwrap().len(), 2);

    let scoped: Value = fixture
        .client
        .get(fixture.url(&format!("/api/files?folderId={}", folder_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let scoped_files = scoped["files"].as_array().unwrap();
    assert_eq!(scoped_files.len(), 1);
    assert_eq!(scoped_files[0]["name"], "filed.mp3");
}

#[tokio::test]
async fn test_folder_rename_and_delete() {
    let fixture = TestFixture::new().await;

    let folder: Value = fixture
        .client
        .post(fixture.url("/api/folders"))
        .json(&json!({ "name": "Old name" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let folder_id = folder["id"].as_str().unwrap();

    let rename_resp = fixture
        .client
        .put(fixture.url(&format!("/api/folders/{}", folder_id)))
        .json(&json!({ "name": "New name" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rename_resp.status(), 200);
    let renamed: Value = rename_resp.json().await.unwrap();
    assert_eq!(renamed["name"], "New name");

    fixture
        .upload_audio("kept.mp3", "audio/mpeg", Some(folder_id))
        .await;

    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/folders/{}", folder_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let folders: Value = fixture
        .client
        .get(fixture.url("/api/folders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(folders["folders"], json!([]));

    // The file survives, unfiled
    let files: Value = fixture
        .client
        .get(fixture.url("/api/files"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let file_list = files["files"].as_array().unwrap();
    assert_eq!(file_list.len(), 1);
    assert!(file_list[0]["folderId"].is_null());
}

#[tokio::test]
async fn test_folder_rename_unknown_id_is_404() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/folders/no-such-id"))
        .json(&json!({ "name": "Anything" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_annonce_publish_flow() {
    let fixture = TestFixture::new().await;

    let upload: Value = fixture
        .upload_audio("departure.mp3", "audio/mpeg", None)
        .await
        .json()
        .await
        .unwrap();
    let file_id = upload["uploadedFiles"][0]["id"].as_str().unwrap();
    let file_url = upload["uploadedFiles"][0]["url"].as_str().unwrap();

    let create_resp = fixture
        .client
        .post(fixture.url("/api/annonces"))
        .json(&json!({ "title": "Departure chime", "fileId": file_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let annonce: Value = create_resp.json().await.unwrap();
    assert_eq!(annonce["title"], "Departure chime");
    assert_eq!(annonce["url"], file_url);

    let list: Value = fixture
        .client
        .get(fixture.url("/api/annonces"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["annonces"].as_array().unwrap().len(), 1);

    let annonce_id = annonce["id"].as_str().unwrap();
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/annonces/{}", annonce_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let after: Value = fixture
        .client
        .get(fixture.url("/api/annonces"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after["annonces"], json!([]));
}

#[tokio::test]
async fn test_annonce_with_unknown_file_is_404() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/annonces"))
        .json(&json!({ "title": "Ghost", "fileId": "missing" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_news_crud() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/news"))
        .json(&json!({
            "title": "Track work this weekend",
            "date": "30.08.2026",
            "content": "Replacement buses between Morges and Allaman."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let post: Value = create_resp.json().await.unwrap();
    let post_id = post["id"].as_str().unwrap();

    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/news/{}", post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let fetched: Value = get_resp.json().await.unwrap();
    assert_eq!(fetched["title"], "Track work this weekend");

    let list: Value = fixture
        .client
        .get(fixture.url("/api/news"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["news"].as_array().unwrap().len(), 1);

    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/news/{}", post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let missing_resp = fixture
        .client
        .get(fixture.url(&format!("/api/news/{}", post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_resp.status(), 404);
}

#[tokio::test]
async fn test_download_workspace_rejects_wrong_token() {
    let fixture = TestFixture::with_download_token(Some("expected-secret".to_string())).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/download-workspace?token=wrong-secret"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_download_workspace_rejects_missing_token() {
    let fixture = TestFixture::with_download_token(Some("expected-secret".to_string())).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/download-workspace"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_download_workspace_disabled_without_configured_token() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/download-workspace?token=anything"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}
