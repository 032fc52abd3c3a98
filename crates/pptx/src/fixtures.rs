//! In-memory PPTX packages for tests.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Notes attached to a fixture slide.
#[derive(Debug, Clone)]
pub(crate) enum FixtureNotes {
    /// No notes relationship at all.
    None,
    /// A notes part with this XML.
    Xml(String),
    /// A notes part with these exact bytes.
    Raw(Vec<u8>),
    /// A notes relationship whose target part is missing.
    Dangling,
}

impl FixtureNotes {
    pub(crate) fn paragraphs(paragraphs: &[&[&str]]) -> Self {
        FixtureNotes::Xml(notes_slide_xml(paragraphs))
    }
}

/// Builds a minimal but structurally faithful presentation package.
pub(crate) struct DeckBuilder {
    slides: Vec<FixtureNotes>,
    order: Option<Vec<usize>>,
    presentation: bool,
    slide_list: bool,
}

impl DeckBuilder {
    pub(crate) fn new() -> Self {
        Self {
            slides: Vec::new(),
            order: None,
            presentation: true,
            slide_list: true,
        }
    }

    pub(crate) fn slide(mut self, notes: FixtureNotes) -> Self {
        self.slides.push(notes);
        self
    }

    pub(crate) fn slides(mut self, count: usize, notes: FixtureNotes) -> Self {
        for _ in 0..count {
            self.slides.push(notes.clone());
        }
        self
    }

    /// Presentation order as 1-based slide part numbers.
    pub(crate) fn presentation_order(mut self, order: &[usize]) -> Self {
        self.order = Some(order.to_vec());
        self
    }

    /// Drop `ppt/presentation.xml` and its relationship part.
    pub(crate) fn without_presentation(mut self) -> Self {
        self.presentation = false;
        self
    }

    /// Keep the presentation part but leave out `<p:sldIdLst>`.
    pub(crate) fn without_slide_list(mut self) -> Self {
        self.slide_list = false;
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut parts: Vec<(String, Vec<u8>)> = Vec::new();
        let count = self.slides.len();

        // Notes and slides go in first, in reverse, so archive order never
        // matches presentation order.
        for (idx, notes) in self.slides.iter().enumerate().rev() {
            let n = idx + 1;
            let notes_part = format!("ppt/notesSlides/notesSlide{}.xml", n);
            match notes {
                FixtureNotes::None => {
                    parts.push((format!("ppt/slides/_rels/slide{}.xml.rels", n), slide_rels(None)));
                }
                FixtureNotes::Xml(xml) => {
                    parts.push((notes_part, xml.as_bytes().to_vec()));
                    parts.push((format!("ppt/slides/_rels/slide{}.xml.rels", n), slide_rels(Some(n))));
                }
                FixtureNotes::Raw(bytes) => {
                    parts.push((notes_part, bytes.clone()));
                    parts.push((format!("ppt/slides/_rels/slide{}.xml.rels", n), slide_rels(Some(n))));
                }
                FixtureNotes::Dangling => {
                    parts.push((format!("ppt/slides/_rels/slide{}.xml.rels", n), slide_rels(Some(n))));
                }
            }
            parts.push((format!("ppt/slides/slide{}.xml", n), slide_xml(n).into_bytes()));
        }

        if self.presentation {
            let order = self.order.clone().unwrap_or_else(|| (1..=count).collect());
            parts.push((
                "ppt/presentation.xml".to_string(),
                presentation_xml(&order, self.slide_list).into_bytes(),
            ));
            parts.push((
                "ppt/_rels/presentation.xml.rels".to_string(),
                presentation_rels(count).into_bytes(),
            ));
        }

        parts.push(("_rels/.rels".to_string(), package_rels().into_bytes()));
        parts.push(("[Content_Types].xml".to_string(), content_types().into_bytes()));

        let borrowed: Vec<(&str, &[u8])> = parts
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
            .collect();
        zip_bytes(&borrowed)
    }
}

/// Zip arbitrary text parts, in the given order.
pub(crate) fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let borrowed: Vec<(&str, &[u8])> = parts.iter().map(|(n, d)| (*n, d.as_bytes())).collect();
    zip_bytes(&borrowed)
}

fn zip_bytes(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A stored (uncompressed) archive written by hand, where the central
/// directory entry of `oversized` claims `declared` uncompressed bytes
/// through a zip64 extra field. The data and checksums are genuine.
pub(crate) fn stored_zip_with_declared_size(
    parts: &[(&str, &str)],
    oversized: &str,
    declared: u64,
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for (name, data) in parts {
        let offset = out.len() as u32;
        let crc = crc32fast::hash(data.as_bytes());
        let size = data.len() as u32;

        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // flags
        out.extend_from_slice(&0u16.to_le_bytes()); // stored
        out.extend_from_slice(&0u16.to_le_bytes()); // time
        out.extend_from_slice(&0x21u16.to_le_bytes()); // 1980-01-01
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(data.as_bytes());

        let (uncompressed, extra) = if *name == oversized {
            let mut extra = Vec::new();
            extra.extend_from_slice(&0x0001u16.to_le_bytes());
            extra.extend_from_slice(&8u16.to_le_bytes());
            extra.extend_from_slice(&declared.to_le_bytes());
            (u32::MAX, extra)
        } else {
            (size, Vec::new())
        };

        central.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        central.extend_from_slice(&45u16.to_le_bytes()); // made by
        central.extend_from_slice(&45u16.to_le_bytes()); // version needed
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0x21u16.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&size.to_le_bytes());
        central.extend_from_slice(&uncompressed.to_le_bytes());
        central.extend_from_slice(&(name.len() as u16).to_le_bytes());
        central.extend_from_slice(&(extra.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
        central.extend_from_slice(&0u32.to_le_bytes()); // external attributes
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(name.as_bytes());
        central.extend_from_slice(&extra);
    }

    let central_offset = out.len() as u32;
    out.extend_from_slice(&central);

    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(parts.len() as u16).to_le_bytes());
    out.extend_from_slice(&(parts.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&central_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

/// Notes slide XML laid out the way PowerPoint writes it: slide image,
/// body placeholder with the notes, then a slide number placeholder.
pub(crate) fn notes_slide_xml(paragraphs: &[&[&str]]) -> String {
    let mut body = String::new();
    for runs in paragraphs {
        if runs.is_empty() {
            body.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
            continue;
        }
        body.push_str("<a:p>");
        for run in runs.iter() {
            body.push_str(r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>"#);
            body.push_str(run);
            body.push_str("</a:t></a:r>");
        }
        body.push_str("</a:p>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{rel}" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr><p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp><p:sp><p:nvSpPr><p:cNvPr id="4" name="Slide Number Placeholder 3"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="sldNum" sz="quarter" idx="5"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:fld id="{{B3F2D1A0-0000-4000-8000-000000000001}}" type="slidenum"><a:rPr lang="en-US"/><a:t>1</a:t></a:fld><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>"#,
        rel = REL_NS,
        body = body
    )
}

fn slide_xml(n: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{rel}" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>Slide title {n}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
        rel = REL_NS,
        n = n
    )
}

fn slide_rels(notes: Option<usize>) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    );
    if let Some(n) = notes {
        xml.push_str(&format!(
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide{}.xml"/>"#,
            n
        ));
    }
    xml.push_str("</Relationships>");
    xml.into_bytes()
}

fn presentation_xml(order: &[usize], slide_list: bool) -> String {
    let mut list = String::new();
    if slide_list {
        list.push_str("<p:sldIdLst>");
        for (i, n) in order.iter().enumerate() {
            // rIds are assigned by part number, so sldIdLst order is the only
            // source of presentation order.
            list.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, n + 1));
        }
        list.push_str("</p:sldIdLst>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{rel}" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{list}<p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        rel = REL_NS,
        list = list
    )
}

fn presentation_rels(count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );
    for n in 1..=count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            n + 1,
            n
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn package_rels() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#
        .to_string()
}

fn content_types() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/></Types>"#
        .to_string()
}
