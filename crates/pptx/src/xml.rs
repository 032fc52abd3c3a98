//! Small helpers shared by the XML readers.

use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the first attribute whose local name matches, optionally
/// requiring a namespace prefix (`r:id` vs. a plain `id`).
pub(crate) fn attribute(e: &BytesStart<'_>, local: &[u8], prefixed: bool) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        let has_prefix = key.contains(&b':');
        if local_name(key) == local && has_prefix == prefixed {
            Some(String::from_utf8_lossy(&attr.value).to_string())
        } else {
            None
        }
    })
}
