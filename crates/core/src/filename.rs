//! Filename policy for uploads and generated documents.
//!
//! Uploaded names are untrusted: they are reduced to a plain ASCII basename
//! before anything is derived from them.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Characters that survive in a secured filename.
static UNSAFE_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

/// Suffix appended to the input stem for the generated document.
pub const OUTPUT_SUFFIX: &str = "_notes.docx";

/// Stem used when nothing usable is left of the uploaded name.
pub const FALLBACK_STEM: &str = "presentation";

/// Reduce an arbitrary filename to a safe ASCII basename.
///
/// Decomposes compatibility characters, drops anything non-ASCII, turns path
/// separators and whitespace runs into single underscores, removes every
/// character outside `[A-Za-z0-9_.-]` and strips leading/trailing dots and
/// underscores. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS_REGEX.replace_all(&joined, "");

    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}

/// Derive the download name for the notes document of an uploaded file.
///
/// `"Quarterly Review.pptx"` becomes `"Quarterly_Review_notes.docx"`.
pub fn output_filename(input: &str) -> String {
    let raw_stem = match input.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains(|c: char| c == '/' || c == '\\') => stem,
        _ => input,
    };

    let stem = secure_filename(raw_stem);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

/// Case-insensitive extension check, e.g. `has_extension("a.PPTX", "pptx")`.
pub fn has_extension(name: &str, ext: &str) -> bool {
    name.rsplit_once('.')
        .map(|(stem, e)| !stem.is_empty() && e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
