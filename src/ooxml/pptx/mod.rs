//! PowerPoint (.pptx) presentation support.
//!
//! A .pptx file is an OPC package. Decoding follows the relationship graph:
//!
//! - `package`: root relationships -> presentation part -> slide id list
//! - `parts`: presentation, slide/layout/master, theme and chart parts
//! - `slide`: one slide with the shapes it inherits from layout and master
//! - `shapes`: shape trees, text frames, pictures, tables and charts
//! - `color`: DrawingML colours and fills, resolved through the theme
//!
//! # Example
//!
//! ```rust,no_run
//! use deckread::{DeckParser, DecodeOptions};
//! use deckread::ooxml::pptx::PptxDeckParser;
//!
//! let bytes = std::fs::read("presentation.pptx")?;
//! let options = DecodeOptions::default().with_max_slides(100);
//! for slide in PptxDeckParser.parse(&bytes, &options)? {
//!     println!("{}", slide.text());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod color;
pub mod package;
pub mod parts;
pub mod shapes;
pub mod slide;

pub use package::{DEFAULT_SLIDE_LIMIT, PptxDeckParser};
