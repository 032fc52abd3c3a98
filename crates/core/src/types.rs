//! Domain types for slides, their notes links, and extracted notes.

use serde::{Deserialize, Serialize};

/// All speaker notes recovered from one presentation, in slide order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerNotes {
    /// Original filename (without path).
    pub filename: String,

    /// One record per slide, ordinals contiguous from 1.
    pub slides: Vec<SlideNoteRecord>,
}

impl SpeakerNotes {
    /// Create an empty set of notes for the given file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Append the record for the next slide.
    pub fn add_slide(&mut self, record: SlideNoteRecord) {
        self.slides.push(record);
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of slides that actually carry notes text.
    pub fn annotated_count(&self) -> usize {
        self.slides.iter().filter(|s| s.has_notes()).count()
    }
}

/// Notes text for a single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideNoteRecord {
    /// 1-based position in presentation order.
    pub ordinal: usize,

    /// Reconstructed notes text; empty when the slide has none.
    pub text: String,
}

impl SlideNoteRecord {
    pub fn new(ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            text: text.into(),
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.text.is_empty()
    }
}

/// A slide part located inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRef {
    /// 1-based position in presentation order.
    pub ordinal: usize,

    /// Package part name, e.g. `ppt/slides/slide3.xml`.
    pub part: String,

    /// The slide's notes part, if it links one.
    pub notes: Option<NotesRef>,
}

impl SlideRef {
    pub fn new(ordinal: usize, part: impl Into<String>) -> Self {
        Self {
            ordinal,
            part: part.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: NotesRef) -> Self {
        self.notes = Some(notes);
        self
    }
}

/// The notes part linked from a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesRef {
    /// Package part name, e.g. `ppt/notesSlides/notesSlide3.xml`.
    pub part: String,
}

impl NotesRef {
    pub fn new(part: impl Into<String>) -> Self {
        Self { part: part.into() }
    }
}
