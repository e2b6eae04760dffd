//! Deckread - decode presentation files into one canonical slide deck model
//!
//! This library decodes four unrelated presentation container formats into a
//! single renderer-agnostic [`SlideDeck`]:
//!
//! - **PPT**: legacy binary PowerPoint (OLE2 compound file + record stream)
//! - **PPTX**: Office Open XML presentations (ZIP + OOXML parts)
//! - **ODP**: OpenDocument presentations (ZIP + ODF XML)
//! - **Keynote**: Apple Keynote packages, decoded from their embedded
//!   slide thumbnails only
//!
//! Every format ends up as the same shape/text/paragraph/run representation,
//! so a caller renders one model regardless of where the deck came from.
//!
//! # Example
//!
//! ```no_run
//! use deckread::{DecodeOptions, SlideDeck};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("talk.pptx")?;
//! let deck = SlideDeck::decode(&bytes, "talk.pptx", &DecodeOptions::default())?;
//!
//! for (index, slide) in deck.iter().enumerate() {
//!     println!("Slide {} ({}x{}): {} shapes", index, slide.size.width, slide.size.height, slide.shapes.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Using one parser directly
//!
//! ```no_run
//! use deckread::{DecodeOptions, DeckParser};
//! use deckread::odf::OdpDeckParser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("talk.odp")?;
//! let slides = OdpDeckParser.parse(&bytes, &DecodeOptions::default())?;
//! println!("{} slides", slides.len());
//! # Ok(())
//! # }
//! ```

/// Common types, errors and utilities shared across formats
pub mod common;

/// Canonical slide deck model and format dispatch
pub mod presentation;

/// Picture blob handling shared by the binary parser
#[cfg(feature = "ole")]
pub mod images;

/// OLE2 compound files and the legacy binary PowerPoint parser
#[cfg(feature = "ole")]
pub mod ole;

/// Office Open XML packaging and the PPTX parser
#[cfg(feature = "ooxml")]
pub mod ooxml;

/// OpenDocument presentation parser
#[cfg(feature = "odf")]
pub mod odf;

/// Apple iWork packages (Keynote thumbnail fallback)
#[cfg(feature = "iwa")]
pub mod iwa;

// Re-export commonly used types for convenience
pub use common::{Error, RGBColor, Result};
pub use presentation::{
    BoundingBox, Bullet, ChartData, DecodeOptions, DeckParser, Fill, FontStyle, FontWeight,
    Geometry, ImageData, Paragraph, Run, RunStyle, Shape, ShapeProps, Slide, SlideDeck,
    SlideFormat, SlideSize, TextAlign, TextBody, VerticalAlign,
};
