//! Common types, traits, and utilities shared across formats.
//!
//! This module provides the byte, geometry, colour and XML helpers that every
//! presentation parser builds on, together with the crate-wide error type.

// Submodule declarations
pub mod binary;
pub mod detection;
pub mod error;
pub mod media;
pub mod style;
pub mod unit;
pub mod xml;

#[cfg(any(feature = "ooxml", feature = "odf", feature = "iwa"))]
pub mod package;

// Re-exports for convenience
pub use detection::detect_slide_format_from_bytes;
pub use error::{Error, Result};
pub use style::RGBColor;
pub use unit::{Length, LengthUnit};

#[cfg(any(feature = "ooxml", feature = "odf", feature = "iwa"))]
pub use package::ZipPackage;
