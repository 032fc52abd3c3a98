//! Notes document generation: lays out slide notes as headings and body
//! paragraphs and writes them as a WordprocessingML (.docx) package.

pub mod model;
pub mod parts;
pub mod writer;

pub use model::{Block, DocumentOptions, NotesDocument, DEFAULT_TITLE, NO_NOTES_PLACEHOLDER};
pub use writer::{document_xml, write_docx, DocumentBuilder};

/// MIME type of the generated documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
