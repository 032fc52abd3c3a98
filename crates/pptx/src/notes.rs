//! Speaker notes text reconstruction from notes slide XML.

use crate::archive::Container;
use crate::xml::{attribute, local_name};
use notes_core::{Error, NotesRef, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};

/// Placeholder type that carries the notes text on a notes page.
const BODY_PLACEHOLDER: &str = "body";

/// Extracts plain text from the body placeholder of a notes slide.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotesExtractor;

impl NotesExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Read and extract the notes part of one slide.
    pub fn extract<R: Read + Seek>(
        &self,
        container: &mut Container<R>,
        notes: &NotesRef,
    ) -> Result<String> {
        let bytes = container.read(&notes.part).map_err(|e| match e {
            Error::PartNotFound(target) => Error::BrokenRelationship {
                source_part: notes.part.clone(),
                target,
            },
            other => malformed(&notes.part, other.to_string()),
        })?;

        let xml = std::str::from_utf8(&bytes)
            .map_err(|e| malformed(&notes.part, format!("invalid UTF-8: {}", e)))?;

        self.extract_from_xml(&notes.part, xml.trim_start_matches('\u{feff}'))
    }

    /// Extract notes text from notes slide XML.
    ///
    /// Runs inside a paragraph are concatenated as-is, every paragraph ends
    /// with a newline, `<a:br/>` becomes a newline and fields are skipped.
    /// The whole result is trimmed once.
    pub fn extract_from_xml(&self, part: &str, xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);

        let mut depth: usize = 0;
        let mut shape: Option<ShapeText> = None;
        let mut notes: Option<String> = None;
        let mut in_text_body = false;
        let mut in_paragraph = false;
        let mut in_field = false;
        let mut in_run_text = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                malformed(part, format!("{} at byte {}", e, reader.buffer_position()))
            })?;

            match event {
                Event::Start(ref e) => {
                    depth += 1;
                    match local_name(e.name().as_ref()) {
                        b"sp" => shape = Some(ShapeText::default()),
                        b"ph" => mark_placeholder(shape.as_mut(), e),
                        b"txBody" => in_text_body = shape.is_some(),
                        b"p" if in_text_body => in_paragraph = true,
                        b"br" if in_paragraph => push_text(shape.as_mut(), "\n"),
                        b"fld" if in_paragraph => in_field = true,
                        b"t" if in_paragraph && !in_field => in_run_text = true,
                        _ => {}
                    }
                }
                Event::Empty(ref e) => match local_name(e.name().as_ref()) {
                    b"ph" => mark_placeholder(shape.as_mut(), e),
                    b"br" if in_paragraph => push_text(shape.as_mut(), "\n"),
                    b"p" if in_text_body => push_text(shape.as_mut(), "\n"),
                    _ => {}
                },
                Event::Text(ref e) if in_run_text => {
                    let text = e.unescape().map_err(|e| malformed(part, e.to_string()))?;
                    push_text(shape.as_mut(), &text);
                }
                Event::CData(ref e) if in_run_text => {
                    push_text(shape.as_mut(), &String::from_utf8_lossy(e));
                }
                Event::End(ref e) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| malformed(part, "unbalanced end tag".to_string()))?;
                    match local_name(e.name().as_ref()) {
                        b"t" => in_run_text = false,
                        b"fld" => in_field = false,
                        b"p" if in_paragraph => {
                            push_text(shape.as_mut(), "\n");
                            in_paragraph = false;
                        }
                        b"txBody" => in_text_body = false,
                        b"sp" => {
                            if let Some(done) = shape.take() {
                                if done.is_body && notes.is_none() {
                                    notes = Some(done.text);
                                }
                            }
                            in_text_body = false;
                            in_paragraph = false;
                        }
                        _ => {}
                    }
                }
                Event::Eof => {
                    if depth != 0 {
                        return Err(malformed(part, "unexpected end of document".to_string()));
                    }
                    break;
                }
                _ => {}
            }
        }

        match notes {
            Some(text) => Ok(text.trim().to_string()),
            None => {
                log::debug!("{} has no body placeholder", part);
                Ok(String::new())
            }
        }
    }
}

/// Text collected from one shape while parsing.
#[derive(Debug, Default)]
struct ShapeText {
    is_body: bool,
    text: String,
}

fn mark_placeholder(shape: Option<&mut ShapeText>, e: &BytesStart<'_>) {
    if let Some(shape) = shape {
        if attribute(e, b"type", false).as_deref() == Some(BODY_PLACEHOLDER) {
            shape.is_body = true;
        }
    }
}

fn push_text(shape: Option<&mut ShapeText>, text: &str) {
    if let Some(shape) = shape {
        shape.text.push_str(text);
    }
}

fn malformed(part: &str, reason: String) -> Error {
    Error::MalformedNotesPart {
        part: part.to_string(),
        reason,
    }
}
