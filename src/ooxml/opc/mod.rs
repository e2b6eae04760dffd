/// Open Packaging Conventions (OPC) helpers.
///
/// A presentation package is a ZIP archive of XML parts tied together by
/// relationship (`.rels`) parts. This module provides the two pieces a
/// reader needs on top of plain entry access:
///
/// - [`PackURI`]: part names and resolution of relative targets
/// - [`Relationships`]: the relationships of one source part
///
/// Entry access itself goes through [`crate::common::ZipPackage`].

pub mod constants;
pub mod packuri;
pub mod rel;

// Re-export commonly used types
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
