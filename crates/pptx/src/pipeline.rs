//! Drives enumeration and extraction across a whole presentation.

use crate::archive::Container;
use crate::notes::NotesExtractor;
use crate::slides::SlideEnumerator;
use notes_core::{Error, Result, SlideNoteRecord, SpeakerNotes};
use std::io::{Cursor, Read, Seek};

/// Turns a presentation package into one notes record per slide.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotesPipeline {
    enumerator: SlideEnumerator,
    extractor: NotesExtractor,
}

impl NotesPipeline {
    /// Create a new pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a PPTX package from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<SpeakerNotes> {
        let mut container = Container::open(reader)?;

        let mut notes = SpeakerNotes::new(filename);
        for record in self.run(&mut container)? {
            notes.add_slide(record);
        }

        log::debug!(
            "{}: {} slides, {} with notes",
            filename,
            notes.slide_count(),
            notes.annotated_count()
        );

        Ok(notes)
    }

    /// Parse a PPTX package held in memory.
    pub fn parse_bytes(&self, bytes: &[u8], filename: &str) -> Result<SpeakerNotes> {
        self.parse(Cursor::new(bytes), filename)
    }

    /// One record per slide in presentation order.
    ///
    /// Broken notes links and unparsable notes parts only blank out the
    /// affected slide. Fails with `EmptyPresentation` when there are no slides.
    pub fn run<R: Read + Seek>(&self, container: &mut Container<R>) -> Result<Vec<SlideNoteRecord>> {
        let list = self.enumerator.enumerate(container)?;
        if list.is_empty() {
            return Err(Error::EmptyPresentation);
        }

        let mut records = Vec::with_capacity(list.len());
        for slide in &list.slides {
            let text = match &slide.notes {
                Some(notes_ref) => match self.extractor.extract(container, notes_ref) {
                    Ok(text) => text,
                    Err(e) if e.is_recoverable() => {
                        log::warn!("Slide {}: {} (using empty notes)", slide.ordinal, e);
                        String::new()
                    }
                    Err(e) => return Err(e),
                },
                None => String::new(),
            };
            records.push(SlideNoteRecord::new(slide.ordinal, text));
        }

        Ok(records)
    }
}
