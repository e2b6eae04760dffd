//! XML helpers shared by the XML-based parsers.

pub mod escape;

#[cfg(any(feature = "ooxml", feature = "odf", feature = "iwa"))]
pub mod dom;

pub use escape::unescape_xml;

#[cfg(any(feature = "ooxml", feature = "odf", feature = "iwa"))]
pub use dom::{XmlDocument, XmlElement, XmlNode, local_name, merge_attributes};
