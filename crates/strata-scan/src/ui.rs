//! UI-description document scanning.
//!
//! Emits a [`Reference`] for every element tag not in the always-available
//! allow-list, at the tag's line. Tag presence only: attributes are not
//! modeled, and UI documents carry no suppression scopes.

use quick_xml::events::Event;
use quick_xml::Reader;

use strata_core::types::{ApiKind, Reference};

use crate::unit::UnitError;

/// Tags available on every platform version; never worth a catalog lookup.
const ALWAYS_AVAILABLE: &[&str] = &[
    "View",
    "ViewGroup",
    "ViewStub",
    "SurfaceView",
    "TextureView",
    "include",
    "merge",
    "requestFocus",
];

/// Scan one UI document. `file` is the path violations are reported
/// against.
pub fn scan_document(content: &str, file: &str) -> Result<Vec<Reference>, UnitError> {
    let mut reader = Reader::from_str(content);
    let mut references = Vec::new();

    loop {
        // buffer_position sits exactly at the `<` of the next tag: text
        // between elements is consumed as its own event.
        let pos = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| UnitError::MalformedDocument(e.to_string()))?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|_| UnitError::MalformedDocument("non-UTF-8 tag name".to_string()))?;
                if ALWAYS_AVAILABLE.contains(&tag) {
                    continue;
                }
                references.push(Reference {
                    kind: ApiKind::UiTag,
                    owner: tag.to_string(),
                    member: None,
                    file: file.to_string(),
                    line: line_at(content, pos),
                    enclosing: None,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(references)
}

fn line_at(content: &str, byte_pos: usize) -> u32 {
    let pos = byte_pos.min(content.len());
    content.as_bytes()[..pos].iter().filter(|&&b| b == b'\n').count() as u32 + 1
}
