//! A single decoded slide.

use super::shape::{BoundingBox, Shape};
use crate::common::RGBColor;
use serde::Serialize;

/// Slide dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl SlideSize {
    /// 10in x 7.5in at 96 DPI.
    pub const DEFAULT: Self = Self::new(960, 720);

    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Box for a shape whose position is unknown: 80% x 60% of the slide,
    /// inset 10% from the left and 20% from the top.
    pub fn fallback_box(&self) -> BoundingBox {
        let (w, h) = (self.width as f64, self.height as f64);
        BoundingBox::from_f64(w * 0.1, h * 0.2, w * 0.8, h * 0.6)
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A slide in a decoded deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    /// Opaque source identifier, for diagnostics
    pub path: String,
    pub size: SlideSize,
    /// Shapes in paint order, back to front
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<RGBColor>,
}

impl Slide {
    pub fn new(path: impl Into<String>, size: SlideSize) -> Self {
        Self {
            path: path.into(),
            size,
            shapes: Vec::new(),
            background: None,
        }
    }

    /// Plain text of every text shape, one paragraph per line.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use deckread::{DecodeOptions, SlideDeck};
    ///
    /// let bytes = std::fs::read("presentation.ppt")?;
    /// let deck = SlideDeck::decode(&bytes, "presentation.ppt", &DecodeOptions::default())?;
    /// for slide in deck.iter() {
    ///     println!("Slide text: {}", slide.text());
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn text(&self) -> String {
        self.shapes
            .iter()
            .filter_map(Shape::text_body)
            .map(|body| body.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any shape on the slide is an image a renderer can display.
    pub fn has_displayable_image(&self) -> bool {
        self.shapes
            .iter()
            .filter_map(Shape::image)
            .any(|img| img.is_displayable())
    }
}
