//! Parsing passes over the `PowerPoint Document` stream.
//!
//! - `document`: slide size, outline text and blip store
//! - `shape`: shapes of one slide container

pub mod document;
pub mod shape;

pub use document::DocumentInfo;
pub use shape::{ShapeBuilder, SlideContext, SlideShapes, extract_shapes};
