//! Serializes a [`NotesDocument`] to .docx bytes.
//!
//! Output is a pure function of the blocks: parts are written in a fixed
//! order with a fixed timestamp, and nothing random goes into the package.

use crate::model::{Block, DocumentOptions, NotesDocument};
use crate::parts;
use notes_core::{Error, Result, SlideNoteRecord};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Builds notes documents from slide records.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    options: DocumentOptions,
}

impl DocumentBuilder {
    /// Create a builder with the default title and placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DocumentOptions) -> Self {
        Self { options }
    }

    /// Lay out the records without serializing them.
    pub fn layout(&self, records: &[SlideNoteRecord]) -> NotesDocument {
        NotesDocument::from_records(records, &self.options)
    }

    /// Lay out and serialize the records.
    pub fn build(&self, records: &[SlideNoteRecord]) -> Result<Vec<u8>> {
        let document = self.layout(records);
        let bytes = write_docx(&document)?;
        log::debug!(
            "Built notes document: {} blocks, {} bytes",
            document.blocks().len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Serialize a document to the bytes of a .docx package.
pub fn write_docx(document: &NotesDocument) -> Result<Vec<u8>> {
    let document_xml = document_xml(document)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let entries: [(&str, &[u8]); 5] = [
        (parts::CONTENT_TYPES_PART, parts::content_types_xml().as_bytes()),
        (parts::PACKAGE_RELS_PART, parts::package_rels_xml().as_bytes()),
        (parts::DOCUMENT_PART, document_xml.as_bytes()),
        (parts::DOCUMENT_RELS_PART, parts::document_rels_xml().as_bytes()),
        (parts::STYLES_PART, parts::styles_xml().as_bytes()),
    ];

    for (name, data) in entries {
        zip.start_file(name, options)
            .map_err(|e| serialization(format!("Failed to start '{}': {}", name, e)))?;
        zip.write_all(data)
            .map_err(|e| serialization(format!("Failed to write '{}': {}", name, e)))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| serialization(format!("Failed to finish archive: {}", e)))?;

    Ok(cursor.into_inner())
}

/// The `word/document.xml` part for a document.
pub fn document_xml(document: &NotesDocument) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_error)?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", parts::W_NS));
    root.push_attribute(("xmlns:r", parts::R_NS));
    writer.write_event(Event::Start(root)).map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("w:body")))
        .map_err(xml_error)?;

    for block in document.blocks() {
        write_paragraph(&mut writer, block).map_err(xml_error)?;
    }

    write_section_properties(&mut writer).map_err(xml_error)?;

    writer
        .write_event(Event::End(BytesEnd::new("w:body")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("w:document")))
        .map_err(xml_error)?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| serialization(format!("Document XML is not UTF-8: {}", e)))
}

fn write_paragraph<W: Write>(writer: &mut Writer<W>, block: &Block) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    let mut style = BytesStart::new("w:pStyle");
    style.push_attribute(("w:val", block.style_id()));
    writer.write_event(Event::Empty(style))?;
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    let text = sanitize(block.text());
    if !text.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        for (line_idx, line) in text.split('\n').enumerate() {
            if line_idx > 0 {
                writer.write_event(Event::Empty(BytesStart::new("w:br")))?;
            }
            for (tab_idx, segment) in line.split('\t').enumerate() {
                if tab_idx > 0 {
                    writer.write_event(Event::Empty(BytesStart::new("w:tab")))?;
                }
                if segment.is_empty() {
                    continue;
                }
                let mut t = BytesStart::new("w:t");
                t.push_attribute(("xml:space", "preserve"));
                writer.write_event(Event::Start(t))?;
                writer.write_event(Event::Text(BytesText::new(segment)))?;
                writer.write_event(Event::End(BytesEnd::new("w:t")))?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))
}

/// US Letter, one-inch margins.
fn write_section_properties<W: Write>(writer: &mut Writer<W>) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

    let mut size = BytesStart::new("w:pgSz");
    size.push_attribute(("w:w", "12240"));
    size.push_attribute(("w:h", "15840"));
    writer.write_event(Event::Empty(size))?;

    let mut margins = BytesStart::new("w:pgMar");
    for (key, value) in [
        ("w:top", "1440"),
        ("w:right", "1440"),
        ("w:bottom", "1440"),
        ("w:left", "1440"),
        ("w:header", "708"),
        ("w:footer", "708"),
        ("w:gutter", "0"),
    ] {
        margins.push_attribute((key, value));
    }
    writer.write_event(Event::Empty(margins))?;

    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))
}

/// Drop carriage returns and characters XML 1.0 cannot carry.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect()
}

fn xml_error(e: quick_xml::Error) -> Error {
    serialization(format!("XML write error: {}", e))
}

fn serialization(message: String) -> Error {
    Error::SerializationFailure(message)
}
