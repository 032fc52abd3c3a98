//! Relationship descriptors (`*.rels` parts) and target resolution.

use crate::xml::local_name;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Relationship kinds, matched on the last segment of the `Type` URI.
pub mod kinds {
    pub const OFFICE_DOCUMENT: &str = "officeDocument";
    pub const SLIDE: &str = "slide";
    pub const NOTES_SLIDE: &str = "notesSlide";
}

/// One `<Relationship>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is a URI, not a package part.
    pub external: bool,
}

impl Relationship {
    /// Whether the relationship type URI ends in the given kind.
    ///
    /// `slide` matches `.../relationships/slide` but not `slideLayout`.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(kind)
    }
}

/// Name of the relationship part describing `part`.
///
/// The package itself is the empty source name and maps to `_rels/.rels`.
pub fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns the relationship.
///
/// Relative targets are taken from the source part's directory, `.` and `..`
/// segments are collapsed, and a leading `/` makes the target package-absolute.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    let relative = match target.strip_prefix('/') {
        Some(absolute) => absolute,
        None => {
            if let Some((dir, _)) = source_part.rsplit_once('/') {
                segments.extend(dir.split('/').filter(|s| !s.is_empty()));
            }
            target
        }
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Parse the entries of a relationship part.
pub fn parse_relationships(xml: &str) -> quick_xml::Result<Vec<Relationship>> {
    let mut relationships = Vec::new();

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(ref e) | Event::Start(ref e)
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                    external: false,
                };

                for attr in e.attributes().flatten() {
                    let value = attr
                        .unescape_value()
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        b"TargetMode" => rel.external = value.eq_ignore_ascii_case("External"),
                        _ => {}
                    }
                }

                if rel.target.is_empty() {
                    log::debug!("Skipping relationship '{}' without target", rel.id);
                    continue;
                }
                relationships.push(rel);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}
