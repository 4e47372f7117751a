//! Dynamic-link extraction from drag-and-drop payloads.
//!
//! The compositing tool serializes dragged items as an XML list of
//! `Source` records under a vendor MIME type. Each record's child
//! elements form a flat field map; the `ID` field identifies the item
//! when dropped into the queue.

use std::collections::BTreeMap;

use thiserror::Error;

/// MIME type the compositing tool uses for dragged source lists.
pub const DYNAMIC_LINK_MIME: &str =
    "application/x-qt-windows-mime;value=\"dynamiclinksourcelist\"";

/// Errors that can occur while decoding dynamic links.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The payload was not well-formed XML.
    #[error("malformed dynamic link XML: {0}")]
    MalformedXml(String),
}

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Drag-and-drop payload: format name to raw bytes, in drag order.
///
/// Stand-in for the platform clipboard object; the harness fills it
/// from synthetic drag events.
#[derive(Debug, Clone, Default)]
pub struct MimeData {
    entries: Vec<(String, Vec<u8>)>,
}

impl MimeData {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a payload carrying a single format.
    pub fn with_format(format: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let mut mime = Self::new();
        mime.insert(format, data);
        mime
    }

    /// Add or replace a format.
    pub fn insert(&mut self, format: impl Into<String>, data: impl Into<Vec<u8>>) {
        let format = format.into();
        let data = data.into();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == format) {
            entry.1 = data;
        } else {
            self.entries.push((format, data));
        }
    }

    /// Format names in drag order.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// Whether the payload carries the given format.
    pub fn has_format(&self, format: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == format)
    }

    /// Raw bytes for a format.
    pub fn data(&self, format: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, d)| d.as_slice())
    }

    /// Bytes for a format decoded as text, invalid sequences replaced.
    pub fn text_lossy(&self, format: &str) -> Option<String> {
        self.data(format)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// One dragged source record: field name to text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicLink {
    fields: BTreeMap<String, String>,
}

impl DynamicLink {
    /// The record's `ID` field, used as the queue item label.
    pub fn id(&self) -> Option<&str> {
        self.get("ID")
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Iterate all fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Whether a payload carries the dynamic-link format.
pub fn has_dynamic_links(mime: &MimeData) -> bool {
    mime.has_format(DYNAMIC_LINK_MIME)
}

/// Extract all dynamic links from a payload.
///
/// Returns an empty list when the format is absent; malformed XML is
/// an error for the caller to surface.
pub fn dynamic_links(mime: &MimeData) -> LinkResult<Vec<DynamicLink>> {
    match mime.data(DYNAMIC_LINK_MIME) {
        Some(bytes) => parse_dynamic_links(bytes),
        None => Ok(Vec::new()),
    }
}

/// Parse a raw dynamic-link payload.
///
/// The bytes are decoded as UTF-8 with invalid sequences replaced,
/// then every `Source` element anywhere in the document becomes one
/// link: each child element's tag and text form a field (missing text
/// reads as an empty string).
pub fn parse_dynamic_links(bytes: &[u8]) -> LinkResult<Vec<DynamicLink>> {
    let text = String::from_utf8_lossy(bytes);
    let doc = roxmltree::Document::parse(text.as_ref())
        .map_err(|e| LinkError::MalformedXml(e.to_string()))?;

    let mut links = Vec::new();
    for source in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Source")
    {
        let mut link = DynamicLink::default();
        for child in source.children().filter(|n| n.is_element()) {
            link.fields.insert(
                child.tag_name().name().to_string(),
                child.text().unwrap_or("").to_string(),
            );
        }
        links.push(link);
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SOURCES: &str = r#"<?xml version="1.0"?>
        <SourceList>
            <Source>
                <ID>Comp 01</ID>
                <Name>Hero Shot</Name>
            </Source>
            <Source>
                <ID>Comp 02</ID>
                <Name>Titles</Name>
            </Source>
        </SourceList>"#;

    #[test]
    fn extracts_one_link_per_source() {
        let links = parse_dynamic_links(TWO_SOURCES.as_bytes()).unwrap();
        assert_eq!(links.len(), 2);
        for link in &links {
            let keys: Vec<&str> = link.fields().map(|(k, _)| k).collect();
            assert_eq!(keys, vec!["ID", "Name"]);
        }
        assert_eq!(links[0].id(), Some("Comp 01"));
        assert_eq!(links[1].get("Name"), Some("Titles"));
    }

    #[test]
    fn sources_are_found_at_any_depth() {
        let xml = "<Root><Group><Source><ID>A</ID></Source></Group></Root>";
        let links = parse_dynamic_links(xml.as_bytes()).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id(), Some("A"));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let result = parse_dynamic_links(b"<SourceList><Source>");
        assert!(matches!(result, Err(LinkError::MalformedXml(_))));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"<L><Source><ID>Comp \xff01</ID></Source></L>");
        let links = parse_dynamic_links(&bytes).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id(), Some("Comp \u{fffd}01"));
    }

    #[test]
    fn empty_child_text_reads_as_empty_string() {
        let xml = "<L><Source><ID>A</ID><Note/></Source></L>";
        let links = parse_dynamic_links(xml.as_bytes()).unwrap();
        assert_eq!(links[0].get("Note"), Some(""));
    }

    #[test]
    fn payload_without_the_format_yields_no_links() {
        let mime = MimeData::with_format("text/plain", "not a link");
        assert!(!has_dynamic_links(&mime));
        assert!(dynamic_links(&mime).unwrap().is_empty());
    }

    #[test]
    fn payload_with_the_format_round_trips() {
        let mime = MimeData::with_format(DYNAMIC_LINK_MIME, TWO_SOURCES);
        assert!(has_dynamic_links(&mime));
        assert_eq!(dynamic_links(&mime).unwrap().len(), 2);
    }

    #[test]
    fn mime_insert_replaces_existing_format() {
        let mut mime = MimeData::with_format("text/plain", "one");
        mime.insert("text/plain", "two");
        assert_eq!(mime.text_lossy("text/plain").as_deref(), Some("two"));
        assert_eq!(mime.formats().count(), 1);
    }
}
