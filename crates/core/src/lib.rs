//! Core domain types, error taxonomy, and filename policy for extracting
//! speaker notes from presentations.

pub mod error;
pub mod filename;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use filename::{has_extension, output_filename, secure_filename};
pub use types::{NotesRef, SlideNoteRecord, SlideRef, SpeakerNotes};
