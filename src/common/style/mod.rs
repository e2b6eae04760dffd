//! Common style types.
//!
//! Colour parsing shared by every presentation format.

pub mod color;

pub use color::RGBColor;
