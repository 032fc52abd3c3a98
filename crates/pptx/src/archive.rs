//! Read access to the parts of a PPTX package.

use notes_core::{Error, Result};
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Content-type descriptor every OPC package carries.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Package-level relationship descriptor every OPC package carries.
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";

/// Largest part the reader will inflate.
pub const MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

/// An opened presentation package.
///
/// Owns the underlying reader for as long as it lives, so dropping the
/// container releases the file or buffer it was opened from.
pub struct Container<R> {
    archive: ZipArchive<R>,
    parts: BTreeSet<String>,
}

impl<'a> Container<Cursor<&'a [u8]>> {
    /// Open a package held entirely in memory.
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self> {
        Self::open(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Container<R> {
    /// Open a package, rejecting anything that is not a ZIP archive with the
    /// mandatory OPC descriptors.
    pub fn open(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::CorruptArchive(format!("Failed to open ZIP: {}", e)))?;

        let parts: BTreeSet<String> = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect();

        for required in [CONTENT_TYPES_PART, PACKAGE_RELS_PART] {
            if !parts.contains(required) {
                return Err(Error::CorruptArchive(format!(
                    "Missing required part '{}'",
                    required
                )));
            }
        }

        log::debug!("Opened package with {} parts", parts.len());

        Ok(Self { archive, parts })
    }

    /// All part names in the package.
    pub fn list_parts(&self) -> &BTreeSet<String> {
        &self.parts
    }

    pub fn contains(&self, part: &str) -> bool {
        self.parts.contains(part)
    }

    /// Read the raw bytes of a part.
    pub fn read(&mut self, part: &str) -> Result<Vec<u8>> {
        let file = self.archive.by_name(part).map_err(|e| match e {
            ZipError::FileNotFound => Error::PartNotFound(part.to_string()),
            other => Error::CorruptArchive(format!("Failed to open '{}': {}", part, other)),
        })?;

        read_capped(file, part, MAX_PART_BYTES)
    }

    /// Read a part as UTF-8 text, dropping a leading byte-order mark.
    pub fn read_string(&mut self, part: &str) -> Result<String> {
        let bytes = self.read(part)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::CorruptArchive(format!("Part '{}' is not valid UTF-8: {}", part, e))
        })?;

        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

/// Read at most `limit` bytes; the size recorded in the archive is not trusted.
fn read_capped<R: Read>(reader: R, part: &str, limit: u64) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut content)
        .map_err(|e| Error::CorruptArchive(format!("Failed to read '{}': {}", part, e)))?;

    if content.len() as u64 > limit {
        return Err(Error::CorruptArchive(format!(
            "Part '{}' is larger than {} bytes",
            part, limit
        )));
    }

    Ok(content)
}
