//! A small owned XML tree for cross-referenced document parts.
//!
//! Slide parts, style sheets and relationship files are consulted out of
//! order (layout shapes before slide shapes, parent styles before children),
//! so the parsers load each part once into this tree instead of streaming it.
//! Lookups go by local name so `p:sp`, `draw:frame` and friends match no
//! matter which prefix a producer bound to the namespace.

use super::escape::unescape_xml;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// A node inside an element.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its qualified name, attributes and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified tag name as written, e.g. `p:sp`
    pub name: String,
    /// Attributes in document order, values already unescaped
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// Strip a namespace prefix from a qualified name.
///
/// ```
/// use deckread::common::xml::local_name;
/// assert_eq!(local_name("draw:frame"), "frame");
/// assert_eq!(local_name("frame"), "frame");
/// ```
#[inline]
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The tag name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Whether this element's local name is `name`.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.local_name() == name
    }

    /// Look up an attribute.
    ///
    /// An exact qualified match wins; otherwise the first attribute with the
    /// same local name is returned.
    pub fn attr(&self, name: &str) -> Option<&str> {
        if let Some((_, v)) = self.attributes.iter().find(|(k, _)| k == name) {
            return Some(v);
        }
        let wanted = local_name(name);
        self.attributes
            .iter()
            .find(|(k, _)| local_name(k) == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(local))
    }

    /// Direct children with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.is(local))
    }

    /// Follow a path of local names through direct children.
    ///
    /// ```
    /// use deckread::common::xml::XmlDocument;
    /// let doc = XmlDocument::parse("<a:x><a:y><a:z v='1'/></a:y></a:x>").unwrap();
    /// assert_eq!(doc.root.path(&["y", "z"]).and_then(|z| z.attr("v")), Some("1"));
    /// ```
    pub fn path(&self, locals: &[&str]) -> Option<&XmlElement> {
        locals.iter().try_fold(self, |cur, local| cur.child(local))
    }

    /// All descendants (excluding `self`) with the given local name, in
    /// document order.
    pub fn descendants(&self, local: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(local, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, local: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.elements() {
            if child.is(local) {
                found.push(child);
            }
            child.collect_descendants(local, found);
        }
    }

    /// First descendant with the given local name, depth first.
    pub fn first_descendant(&self, local: &str) -> Option<&XmlElement> {
        for child in self.elements() {
            if child.is(local) {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(local) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text of this element and all its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

/// Merge the attributes of several elements, keyed by local name.
///
/// Later layers win, which is how every style cascade in this crate is
/// expressed: pass the most general layer first.
///
/// ```
/// use deckread::common::xml::{XmlDocument, merge_attributes};
/// let base = XmlDocument::parse(r##"<s fo:font-size="18pt" fo:color="#000000"/>"##).unwrap();
/// let over = XmlDocument::parse(r#"<s fo:font-size="24pt"/>"#).unwrap();
/// let merged = merge_attributes([&base.root, &over.root]);
/// assert_eq!(merged["font-size"], "24pt");
/// assert_eq!(merged["color"], "#000000");
/// ```
pub fn merge_attributes<'a>(
    layers: impl IntoIterator<Item = &'a XmlElement>,
) -> HashMap<String, String> {
    let mut merged = HashMap::new();
    for layer in layers {
        for (key, value) in &layer.attributes {
            merged.insert(local_name(key).to_string(), value.clone());
        }
    }
    merged
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlDocument {
    /// Parse XML text leniently.
    ///
    /// Returns `None` for malformed input (mismatched or unclosed tags, no
    /// root element) instead of an error; callers treat a missing document
    /// and a broken one the same way.
    ///
    /// ```
    /// use deckread::common::xml::XmlDocument;
    /// let doc = XmlDocument::parse("<p:sld><p:sp/><p:sp/></p:sld>").unwrap();
    /// assert_eq!(doc.root.descendants("sp").len(), 2);
    /// assert!(XmlDocument::parse("<a><b></a>").is_none());
    /// assert!(XmlDocument::parse("").is_none());
    /// ```
    pub fn parse(xml: &str) -> Option<Self> {
        let xml = xml.strip_prefix('\u{FEFF}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(element_from_start(e)),
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None if root.is_none() => root = Some(element),
                        None => {},
                    }
                },
                Ok(Event::End(_)) => {
                    let element = stack.pop()?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None if root.is_none() => root = Some(element),
                        None => {},
                    }
                },
                Ok(Event::Text(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(t);
                        current.push_text(&unescape_xml(&raw));
                    }
                },
                Ok(Event::GeneralRef(ref r)) => {
                    if let Some(current) = stack.last_mut() {
                        let name = String::from_utf8_lossy(r);
                        let reference = format!("&{};", name);
                        current.push_text(&unescape_xml(&reference));
                    }
                },
                Ok(Event::CData(ref c)) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(c));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::debug!("XML parse failed at {}: {}", reader.buffer_position(), e);
                    return None;
                },
                _ => {},
            }
        }

        if !stack.is_empty() {
            log::debug!("XML ended with {} unclosed element(s)", stack.len());
            return None;
        }
        root.map(|root| Self { root })
    }

    /// Parse XML bytes, replacing invalid UTF-8.
    pub fn parse_bytes(bytes: &[u8]) -> Option<Self> {
        Self::parse(&String::from_utf8_lossy(bytes))
    }
}

fn element_from_start(e: &BytesStart<'_>) -> XmlElement {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        element.attributes.push((key, unescape_xml(&raw).into_owned()));
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_entities_is_literal() {
        let doc = XmlDocument::parse("<a:t>A&amp;B</a:t>").unwrap();
        assert_eq!(doc.root.text(), "A&B");
        assert_eq!(doc.root.children.len(), 1);
    }

    #[test]
    fn test_cdata_and_attributes() {
        let doc = XmlDocument::parse(r#"<x k="1 &lt; 2"><![CDATA[<raw>]]></x>"#).unwrap();
        assert_eq!(doc.root.attr("k"), Some("1 < 2"));
        assert_eq!(doc.root.text(), "<raw>");
    }

    #[test]
    fn test_attr_local_fallback() {
        let doc = XmlDocument::parse(r#"<r:x r:embed="rId1" xlink:href="a.png"/>"#).unwrap();
        assert_eq!(doc.root.attr("r:embed"), Some("rId1"));
        assert_eq!(doc.root.attr("embed"), Some("rId1"));
        assert_eq!(doc.root.attr("href"), Some("a.png"));
        assert_eq!(doc.root.attr("missing"), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let doc = XmlDocument::parse(
            "<r><a:p n='1'><a:p n='2'/></a:p><b:p n='3'/></r>",
        )
        .unwrap();
        let ns: Vec<_> = doc
            .root
            .descendants("p")
            .iter()
            .filter_map(|p| p.attr("n"))
            .collect();
        assert_eq!(ns, ["1", "2", "3"]);
        assert_eq!(doc.root.first_descendant("p").and_then(|p| p.attr("n")), Some("1"));
    }

    #[test]
    fn test_declaration_and_bom() {
        let doc = XmlDocument::parse("\u{FEFF}<?xml version=\"1.0\"?>\n<root/>").unwrap();
        assert_eq!(doc.root.name, "root");
    }

    #[test]
    fn test_merge_keeps_colour_values() {
        let base = XmlDocument::parse(r##"<s fo:color="#000000" draw:fill-color="#729fcf"/>"##).unwrap();
        let over = XmlDocument::parse(r##"<s fo:color="#ff8800"/>"##).unwrap();
        let merged = merge_attributes([&base.root, &over.root]);
        assert_eq!(merged["color"], "#ff8800");
        assert_eq!(merged["fill-color"], "#729fcf");
    }

    #[test]
    fn test_unclosed_is_none() {
        assert!(XmlDocument::parse("<a><b/>").is_none());
        assert!(XmlDocument::parse("not xml at all").is_none());
    }
}
