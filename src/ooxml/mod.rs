//! Office Open XML (OOXML) presentation support.
//!
//! Two layers:
//!
//! 1. **OPC layer** (`opc`): part names and relationships of the package
//! 2. **PresentationML** (`pptx`): the slide decoder built on top of it
//!
//! Archive access itself goes through [`crate::common::ZipPackage`], shared
//! with the other ZIP-based formats.
pub mod opc;
pub mod pptx;

pub use opc::{PackURI, Relationships};
pub use pptx::PptxDeckParser;
