//! Block model of the generated notes document.

use notes_core::SlideNoteRecord;

/// Title paragraph placed before the slide blocks by default.
pub const DEFAULT_TITLE: &str = "Speaker Notes";

/// Body text used for slides without notes.
pub const NO_NOTES_PLACEHOLDER: &str = "No notes for this slide.";

/// Knobs for turning records into blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Leading title paragraph; `None` leaves it out.
    pub title: Option<String>,
    /// Body text for slides with empty notes.
    pub placeholder: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: Some(DEFAULT_TITLE.to_string()),
            placeholder: NO_NOTES_PLACEHOLDER.to_string(),
        }
    }
}

impl DocumentOptions {
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// One paragraph-level element of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    /// `Slide N` heading.
    Heading(String),
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Title(text) | Block::Heading(text) | Block::Paragraph(text) => text,
        }
    }

    /// Paragraph style id in the generated styles part.
    pub fn style_id(&self) -> &'static str {
        match self {
            Block::Title(_) => "Title",
            Block::Heading(_) => "Heading1",
            Block::Paragraph(_) => "Normal",
        }
    }
}

/// Ordered blocks: optional title, then a heading and a body per slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesDocument {
    blocks: Vec<Block>,
}

impl NotesDocument {
    /// Lay out records in the order given.
    pub fn from_records(records: &[SlideNoteRecord], options: &DocumentOptions) -> Self {
        let mut blocks = Vec::with_capacity(records.len() * 2 + 1);

        if let Some(title) = options.title.as_ref().filter(|t| !t.is_empty()) {
            blocks.push(Block::Title(title.clone()));
        }

        for record in records {
            blocks.push(Block::Heading(slide_label(record.ordinal)));
            let body = if record.text.is_empty() {
                options.placeholder.clone()
            } else {
                record.text.clone()
            };
            blocks.push(Block::Paragraph(body));
        }

        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// Heading text for a slide, e.g. `Slide 3`.
pub fn slide_label(ordinal: usize) -> String {
    format!("Slide {}", ordinal)
}
