//! Error types for speaker-notes extraction and document generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a presentation into a notes document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read input bytes from disk or a stream.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not a readable presentation container.
    #[error("Invalid or corrupted presentation: {0}")]
    CorruptArchive(String),

    /// A part name was requested that the container does not hold.
    #[error("Part not found in archive: {0}")]
    PartNotFound(String),

    /// A relationship points at a part that cannot be resolved.
    #[error("Broken relationship from '{source_part}' to '{target}'")]
    BrokenRelationship { source_part: String, target: String },

    /// A notes part could not be parsed as XML.
    #[error("Malformed notes part '{part}': {reason}")]
    MalformedNotesPart { part: String, reason: String },

    /// The container is valid but holds no slides.
    #[error("The presentation contains no slides")]
    EmptyPresentation,

    /// The output document could not be written.
    #[error("Failed to write notes document: {0}")]
    SerializationFailure(String),
}

impl Error {
    /// Failure category reported to callers at the boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CorruptArchive(_) => ErrorKind::CorruptArchive,
            Error::EmptyPresentation => ErrorKind::EmptyPresentation,
            Error::IoError(_)
            | Error::PartNotFound(_)
            | Error::BrokenRelationship { .. }
            | Error::MalformedNotesPart { .. }
            | Error::SerializationFailure(_) => ErrorKind::Internal,
        }
    }

    /// Per-slide failures that degrade to empty notes instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::BrokenRelationship { .. } | Error::MalformedNotesPart { .. }
        )
    }

    /// Message suitable for showing to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        match self {
            Error::CorruptArchive(_) => {
                "The uploaded file is not a valid PowerPoint (.pptx) presentation.".to_string()
            }
            Error::EmptyPresentation => "The presentation does not contain any slides.".to_string(),
            _ => "Failed to process file.".to_string(),
        }
    }
}

/// Failure categories visible outside the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The upload is not a readable presentation.
    CorruptArchive,
    /// The presentation has zero slides.
    EmptyPresentation,
    /// The request itself was rejected before processing.
    InvalidUpload,
    /// Processing took longer than the boundary allows.
    Timeout,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CorruptArchive => "corrupt_archive",
            ErrorKind::EmptyPresentation => "empty_presentation",
            ErrorKind::InvalidUpload => "invalid_upload",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
