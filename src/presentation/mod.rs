//! Canonical slide deck model.
//!
//! Every supported format decodes into the same renderer-agnostic tree:
//!
//! - [`SlideDeck`]: slides in presentation order
//! - [`Slide`]: size, optional background colour and shapes in paint order
//! - [`Shape`]: a closed set of kinds (text, image, shape, table, chart)
//! - [`TextBody`] / [`Paragraph`] / [`Run`]: styled text
//!
//! The whole model serializes with `serde`, so a caller can hand it to a
//! front end as JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use deckread::{DecodeOptions, Shape, SlideDeck};
//!
//! let bytes = std::fs::read("presentation.pptx")?;
//! let deck = SlideDeck::decode(&bytes, "presentation.pptx", &DecodeOptions::default())?;
//!
//! for (i, slide) in deck.iter().enumerate() {
//!     for shape in &slide.shapes {
//!         if let Shape::Text { text, .. } = shape {
//!             println!("Slide {}: {}", i, text.text());
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod options;
mod prs;
mod shape;
mod slide;
mod text;
mod types;

pub use options::DecodeOptions;
pub use prs::{DeckParser, SlideDeck};
pub use shape::{BoundingBox, ChartData, Fill, Geometry, ImageData, Shape, ShapeProps};
pub use slide::{Slide, SlideSize};
pub use text::{
    Bullet, FontStyle, FontWeight, Paragraph, Run, RunStyle, TextAlign, TextBody, VerticalAlign,
};
pub use types::SlideFormat;
