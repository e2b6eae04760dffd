use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::packuri::PackURI;
/// Relationship parts of a package.
///
/// Each source part may carry a `_rels/<name>.rels` part listing its
/// outgoing relationships. Targets are relative to the source part's
/// directory; external targets (hyperlinks, linked pictures) are kept but
/// never resolved to part names.
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    r_id: String,
    /// Relationship type URI
    reltype: String,
    /// Target reference as written
    target_ref: String,
    /// Directory of the source part
    base_uri: String,
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: impl Into<String>,
        reltype: impl Into<String>,
        target_ref: impl Into<String>,
        base_uri: impl Into<String>,
        is_external: bool,
    ) -> Self {
        Self {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target_ref: target_ref.into(),
            base_uri: base_uri.into(),
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute part name of an internal target.
    ///
    /// Returns `None` for external relationships.
    pub fn target_partname(&self) -> Option<PackURI> {
        if self.is_external {
            return None;
        }
        Some(PackURI::from_rel_ref(&self.base_uri, &self.target_ref))
    }
}

/// The relationships of one source part, keyed by relationship ID.
#[derive(Debug, Default)]
pub struct Relationships {
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Parse a `.rels` part belonging to the part `source`.
    ///
    /// Parsing stops at the first XML error; relationships read before it
    /// are kept.
    ///
    /// ```
    /// use deckread::ooxml::opc::{PackURI, Relationships};
    ///
    /// let xml = r#"<Relationships>
    ///   <Relationship Id="rId2" Type="http://x/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
    /// </Relationships>"#;
    /// let source = PackURI::new("/ppt/slides/slide1.xml").unwrap();
    /// let rels = Relationships::parse(xml, &source);
    /// assert_eq!(rels.target_of("rId2").unwrap().as_str(), "/ppt/slideLayouts/slideLayout1.xml");
    /// ```
    pub fn parse(xml: &str, source: &PackURI) -> Self {
        let base_uri = source.base_uri();
        let mut rels = HashMap::new();
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = String::new();
                    let mut target = None;
                    let mut external = false;
                    for attr in e.attributes().flatten() {
                        let value = attr
                            .unescape_value()
                            .map(|v| v.into_owned())
                            .unwrap_or_default();
                        match attr.key.local_name().as_ref() {
                            b"Id" => r_id = Some(value),
                            b"Type" => reltype = value,
                            b"Target" => target = Some(value),
                            b"TargetMode" => external = value == target_mode::EXTERNAL,
                            _ => {},
                        }
                    }
                    if let (Some(r_id), Some(target)) = (r_id, target) {
                        let rel = Relationship::new(r_id.clone(), reltype, target, base_uri, external);
                        rels.insert(r_id, rel);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!("Relationships of {} truncated: {}", source, e);
                    break;
                },
                _ => {},
            }
        }

        Self { rels }
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Resolved part name of an internal relationship.
    pub fn target_of(&self, r_id: &str) -> Option<PackURI> {
        self.get(r_id)?.target_partname()
    }

    /// First relationship of the given type, in ID order.
    pub fn first_of_type(&self, reltype: &str) -> Option<&Relationship> {
        self.rels
            .values()
            .filter(|rel| rel.reltype() == reltype)
            .min_by(|a, b| a.r_id().cmp(b.r_id()))
    }

    /// Resolved target of the first internal relationship of a type.
    pub fn target_of_type(&self, reltype: &str) -> Option<PackURI> {
        self.first_of_type(reltype)?.target_partname()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as RT;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image2.png"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    fn slide_rels() -> Relationships {
        let source = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        Relationships::parse(RELS, &source)
    }

    #[test]
    fn test_parse_and_resolve() {
        let rels = slide_rels();
        assert_eq!(rels.len(), 3);
        assert_eq!(
            rels.target_of("rId3").map(|u| u.to_string()),
            Some("/ppt/media/image2.png".to_string())
        );
        assert_eq!(
            rels.target_of_type(RT::SLIDE_LAYOUT).map(|u| u.to_string()),
            Some("/ppt/slideLayouts/slideLayout2.xml".to_string())
        );
        assert!(rels.target_of("rId9").is_none());
    }

    #[test]
    fn test_external_target_not_resolved() {
        let rels = slide_rels();
        let link = rels.get("rId2").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://example.com/?a=1&b=2");
        assert!(rels.target_of("rId2").is_none());
    }

    #[test]
    fn test_broken_rels_keep_prefix() {
        let source = PackURI::new("/ppt/presentation.xml").unwrap();
        let xml = r#"<Relationships><Relationship Id="rId1" Type="t" Target="slides/slide1.xml"/><oops"#;
        let rels = Relationships::parse(xml, &source);
        assert_eq!(
            rels.target_of("rId1").map(|u| u.to_string()),
            Some("/ppt/slides/slide1.xml".to_string())
        );
    }
}
