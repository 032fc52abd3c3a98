//! Per-request on-disk staging of uploads.
//!
//! Every staged upload gets a fresh, uniquely named file that is deleted
//! when the [`StagedUpload`] is dropped, whether processing succeeded or not.
//! The uploaded filename never becomes part of the path.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// An upload written to its own temporary file.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    /// Write `bytes` to a new file in `dir`, creating the directory if needed.
    pub fn create(dir: &Path, request_id: &Uuid, bytes: &[u8]) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::Builder::new()
            .prefix(&format!("upload-{}-", request_id))
            .suffix(".pptx")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        log::debug!("[{}] Staged {} bytes at {}", request_id, bytes.len(), file.path().display());

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// A fresh read handle positioned at the start of the staged bytes.
    pub fn reopen(&self) -> io::Result<File> {
        self.file.reopen()
    }
}
