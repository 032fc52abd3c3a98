//! WASM-compatible wrapper for speaker-notes extraction.
//!
//! Exposes the notes pipeline and the document builder to JavaScript over
//! raw bytes, for browsers and edge workers without a filesystem.

use notes_core::{Error, SlideNoteRecord};
use notes_docx::DocumentBuilder;
use notes_pptx::NotesPipeline;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Notes extracted from a presentation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Name the notes document should be saved as.
    pub document_filename: String,
    /// Number of slides in the presentation.
    pub slide_count: usize,
    /// Number of slides with non-empty notes.
    pub annotated_count: usize,
    /// One record per slide, in presentation order.
    pub notes: Vec<SlideNoteRecord>,
}

/// Extract the speaker notes of a `.pptx` file.
///
/// # Arguments
/// * `data` - The raw bytes of the PPTX file
/// * `filename` - The original filename (used for the output name)
///
/// # Returns
/// A JavaScript object with the extraction result, or throws on error.
#[wasm_bindgen]
pub fn extract_notes(data: &[u8], filename: &str) -> Result<JsValue, JsValue> {
    let result = extract_notes_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("internal: Serialization error: {}", e)))
}

/// Build the notes document for a `.pptx` file.
///
/// Returns the `.docx` bytes, or throws on error.
#[wasm_bindgen]
pub fn build_notes_document(data: &[u8], filename: &str) -> Result<js_sys::Uint8Array, JsValue> {
    let bytes = build_notes_document_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;
    Ok(js_sys::Uint8Array::from(bytes.as_slice()))
}

/// `<stem>_notes.docx` for an uploaded filename.
#[wasm_bindgen]
pub fn output_filename(filename: &str) -> String {
    notes_core::output_filename(filename)
}

fn extract_notes_impl(data: &[u8], filename: &str) -> Result<ExtractionResult, String> {
    let notes = NotesPipeline::new()
        .parse_bytes(data, filename)
        .map_err(describe)?;

    Ok(ExtractionResult {
        document_filename: notes_core::output_filename(filename),
        slide_count: notes.slide_count(),
        annotated_count: notes.annotated_count(),
        notes: notes.slides,
    })
}

fn build_notes_document_impl(data: &[u8], filename: &str) -> Result<Vec<u8>, String> {
    let notes = NotesPipeline::new()
        .parse_bytes(data, filename)
        .map_err(describe)?;

    DocumentBuilder::new().build(&notes.slides).map_err(describe)
}

/// `"<category>: <message>"`, the shape JavaScript callers match on.
fn describe(err: Error) -> String {
    format!("{}: {}", err.kind(), err.user_message())
}
