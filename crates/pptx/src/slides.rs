//! Slide enumeration: which slide parts exist, in which order, and which
//! notes part each one links.

use crate::archive::{Container, PACKAGE_RELS_PART};
use crate::rels::{kinds, parse_relationships, rels_part_for, resolve_target, Relationship};
use crate::xml::{attribute, local_name};
use notes_core::{Error, NotesRef, Result, SlideRef};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::sync::LazyLock;

/// Slide parts by naming convention, capturing the embedded index.
static SLIDE_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// How the order of slides was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOrder {
    /// Followed the package relationships to the presentation's slide list.
    Relationships,
    /// Sorted `ppt/slides/slideN.xml` part names by `N`.
    PartNameIndex,
}

impl SlideOrder {
    /// Resolution policies, tried in this order.
    pub const POLICIES: [SlideOrder; 2] = [SlideOrder::Relationships, SlideOrder::PartNameIndex];

    /// Ordered slide part names under this policy.
    pub fn resolve<R: Read + Seek>(self, container: &mut Container<R>) -> Result<Vec<String>> {
        match self {
            SlideOrder::Relationships => slide_list_order(container),
            SlideOrder::PartNameIndex => Ok(part_name_order(container)),
        }
    }
}

/// Slides of a presentation in presentation order.
#[derive(Debug, Clone)]
pub struct SlideList {
    /// The policy that produced this order.
    pub order: SlideOrder,
    pub slides: Vec<SlideRef>,
}

impl SlideList {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Finds slides and their notes parts through relationship metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlideEnumerator;

impl SlideEnumerator {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate all slides, each paired with its notes part if it has one.
    ///
    /// A slide whose notes link is broken is kept, without notes.
    pub fn enumerate<R: Read + Seek>(&self, container: &mut Container<R>) -> Result<SlideList> {
        let (order, parts) = self.slide_parts(container)?;

        let mut slides = Vec::with_capacity(parts.len());
        for (idx, part) in parts.into_iter().enumerate() {
            let mut slide = SlideRef::new(idx + 1, part);
            match self.notes_for_slide(container, &slide.part) {
                Ok(Some(notes)) => {
                    log::debug!("Slide {} ({}) -> {}", slide.ordinal, slide.part, notes.part);
                    slide = slide.with_notes(notes);
                }
                Ok(None) => {
                    log::debug!("Slide {} ({}) has no notes", slide.ordinal, slide.part);
                }
                Err(e) if e.is_recoverable() => {
                    log::warn!("Slide {}: {} (treating as no notes)", slide.ordinal, e);
                }
                Err(e) => return Err(e),
            }
            slides.push(slide);
        }

        Ok(SlideList { order, slides })
    }

    /// Ordered slide part names, from the first policy that succeeds.
    pub fn slide_parts<R: Read + Seek>(
        &self,
        container: &mut Container<R>,
    ) -> Result<(SlideOrder, Vec<String>)> {
        let mut last_error = None;

        for policy in SlideOrder::POLICIES {
            match policy.resolve(container) {
                Ok(parts) => {
                    log::debug!("Resolved {} slides by {:?}", parts.len(), policy);
                    return Ok((policy, parts));
                }
                Err(e) => {
                    log::warn!("Slide order by {:?} unavailable: {}", policy, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(Error::EmptyPresentation))
    }

    /// The notes part linked from a slide's own relationship part.
    ///
    /// A slide without a relationship part, or without a notes relationship,
    /// has no notes. A notes relationship pointing at a missing part or an
    /// unreadable relationship part is a `BrokenRelationship`.
    pub fn notes_for_slide<R: Read + Seek>(
        &self,
        container: &mut Container<R>,
        slide_part: &str,
    ) -> Result<Option<NotesRef>> {
        let rels_part = rels_part_for(slide_part);
        if !container.contains(&rels_part) {
            return Ok(None);
        }

        let broken = |target: &str| Error::BrokenRelationship {
            source_part: slide_part.to_string(),
            target: target.to_string(),
        };

        let content = container.read_string(&rels_part).map_err(|_| broken(&rels_part))?;
        let rels = parse_relationships(&content).map_err(|_| broken(&rels_part))?;

        let mut notes_rels = rels
            .iter()
            .filter(|r| !r.external && r.is_kind(kinds::NOTES_SLIDE));

        let Some(rel) = notes_rels.next() else {
            return Ok(None);
        };
        let extra = notes_rels.count();
        if extra > 0 {
            log::warn!(
                "{} has {} extra notes relationships; using '{}'",
                slide_part,
                extra,
                rel.id
            );
        }

        let notes_part = resolve_target(slide_part, &rel.target);
        if !container.contains(&notes_part) {
            return Err(broken(&notes_part));
        }

        Ok(Some(NotesRef::new(notes_part)))
    }
}

/// Package rels -> presentation part -> its rels + `sldIdLst`.
fn slide_list_order<R: Read + Seek>(container: &mut Container<R>) -> Result<Vec<String>> {
    let package_rels = read_relationships(container, PACKAGE_RELS_PART)?;
    let presentation_part = package_rels
        .iter()
        .find(|r| !r.external && r.is_kind(kinds::OFFICE_DOCUMENT))
        .map(|r| resolve_target("", &r.target))
        .ok_or_else(|| {
            Error::CorruptArchive("No officeDocument relationship in package".to_string())
        })?;

    let slide_targets: HashMap<String, String> =
        read_relationships(container, &rels_part_for(&presentation_part))?
            .into_iter()
            .filter(|r| !r.external && r.is_kind(kinds::SLIDE))
            .map(|r| {
                let part = resolve_target(&presentation_part, &r.target);
                (r.id, part)
            })
            .collect();

    let content = container.read_string(&presentation_part)?;
    let ids = parse_slide_id_list(&content).map_err(|e| {
        Error::CorruptArchive(format!("Cannot parse '{}': {}", presentation_part, e))
    })?;
    let Some(ids) = ids else {
        return Err(Error::CorruptArchive(format!(
            "'{}' has no slide list",
            presentation_part
        )));
    };

    let mut parts = Vec::with_capacity(ids.len());
    for id in ids {
        let part = slide_targets.get(&id).ok_or_else(|| Error::BrokenRelationship {
            source_part: presentation_part.clone(),
            target: id.clone(),
        })?;
        if !container.contains(part) {
            return Err(Error::BrokenRelationship {
                source_part: presentation_part.clone(),
                target: part.clone(),
            });
        }
        parts.push(part.clone());
    }

    Ok(parts)
}

/// Every `ppt/slides/slideN.xml` part, sorted by `N`.
fn part_name_order<R: Read + Seek>(container: &Container<R>) -> Vec<String> {
    let mut numbered: Vec<(u64, &String)> = container
        .list_parts()
        .iter()
        .filter_map(|part| {
            let caps = SLIDE_PART_REGEX.captures(part)?;
            let index = caps[1].parse().ok()?;
            Some((index, part))
        })
        .collect();

    numbered.sort();
    numbered.into_iter().map(|(_, part)| part.clone()).collect()
}

fn read_relationships<R: Read + Seek>(
    container: &mut Container<R>,
    part: &str,
) -> Result<Vec<Relationship>> {
    let content = container.read_string(part)?;
    parse_relationships(&content)
        .map_err(|e| Error::CorruptArchive(format!("Cannot parse '{}': {}", part, e)))
}

/// The `r:id`s of `<p:sldIdLst>`, in document order.
///
/// `None` when the presentation part has no slide list element at all.
fn parse_slide_id_list(xml: &str) -> quick_xml::Result<Option<Vec<String>>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut ids: Option<Vec<String>> = None;
    let mut in_list = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = true;
                ids.get_or_insert_with(Vec::new);
            }
            Event::Empty(ref e) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                ids.get_or_insert_with(Vec::new);
            }
            Event::Start(ref e) | Event::Empty(ref e)
                if in_list && local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let (Some(list), Some(id)) = (ids.as_mut(), attribute(e, b"id", true)) {
                    list.push(id);
                }
            }
            Event::End(ref e) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = false;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}
