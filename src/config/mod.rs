//! Configuration module for the railops backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON entity stores
    pub data_dir: PathBuf,
    /// Directory holding uploaded audio binaries and their metadata file
    pub audio_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Shared secret gating the workspace archive download (endpoint is
    /// disabled when unset)
    pub download_token: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_dir = env::var("RAILOPS_DATA_DIR")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let audio_dir = env::var("RAILOPS_AUDIO_DIR")
            .unwrap_or_else(|_| "./public/audio".to_string())
            .into();

        let bind_addr = env::var("RAILOPS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid RAILOPS_BIND_ADDR format");

        let download_token = env::var("RAILOPS_DOWNLOAD_TOKEN").ok();

        let log_level = env::var("RAILOPS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            data_dir,
            audio_dir,
            bind_addr,
            download_token,
            log_level,
        }
    }
}
