//! API request and response types

use notes_core::{ErrorKind, SlideNoteRecord, SpeakerNotes};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Failure category
    pub kind: ErrorKind,
}

/// Notes extracted from an upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesResponse {
    /// Secured name of the uploaded file
    pub filename: String,
    /// Name the notes document would be downloaded as
    pub document_filename: String,
    pub slide_count: usize,
    pub notes: Vec<SlideNoteRecord>,
}

impl NotesResponse {
    pub fn new(notes: SpeakerNotes) -> Self {
        Self {
            document_filename: notes_core::output_filename(&notes.filename),
            filename: notes_core::secure_filename(&notes.filename),
            slide_count: notes.slide_count(),
            notes: notes.slides,
        }
    }
}
