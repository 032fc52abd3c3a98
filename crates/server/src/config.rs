//! Server configuration from command-line flags and environment variables.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Turn uploaded PowerPoint speaker notes into Word documents over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "notes-server")]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "NOTES_SERVER_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "NOTES_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Stage uploads as per-request temp files in this directory
    /// (default: process uploads in memory)
    #[arg(long, env = "NOTES_STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Per-request processing timeout, in seconds
    #[arg(long, env = "NOTES_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            staging_dir: None,
            request_timeout_secs: 30,
        }
    }
}
