//! Text extraction utilities for PPT records.

pub mod extractor;
pub mod fallback;

// Re-export commonly used items
pub use extractor::{
    ShapeText, TextType, collect_slide_texts, parse_text_bytes_atom, parse_text_chars_atom,
    text_from_atom, text_to_body,
};
pub use fallback::{split_title_body, synthesize_title_body};
