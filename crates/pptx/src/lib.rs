//! PPTX (Office Open XML) backend for speaker-notes extraction.
//!
//! Opens .pptx packages (ZIP archives of XML parts), resolves slide order and
//! notes links through relationship metadata, and rebuilds notes text.

pub mod archive;
pub mod notes;
pub mod pipeline;
pub mod rels;
pub mod slides;
mod xml;

#[cfg(test)]
mod fixtures;

pub use archive::Container;
pub use notes::NotesExtractor;
pub use pipeline::NotesPipeline;
pub use slides::{SlideEnumerator, SlideList, SlideOrder};
