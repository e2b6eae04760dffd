//! Title/body synthesis for slides whose shapes carry no text.
//!
//! Older writers keep slide text only in the outline list. When no shape on
//! a slide shows text, the outline strings are turned into a title shape and
//! a body shape placed near the top of the slide.

use super::extractor::text_to_body;
use crate::presentation::{
    BoundingBox, FontWeight, RunStyle, Shape, ShapeProps, SlideSize, TextAlign,
};

const TITLE_FONT_SIZE: f64 = 40.0;
const BODY_FONT_SIZE: f64 = 24.0;
const TITLE_WORD_LIMIT: usize = 10;

/// Split outline strings into a title and a body.
///
/// Tried in order: several strings (first is the title), a blank line, a
/// line break, the first sentence end, and finally the first ten words.
///
/// ```
/// use deckread::ole::ppt::text::split_title_body;
///
/// let (title, body) = split_title_body(&["Intro. Some details follow here.".to_string()]);
/// assert_eq!(title, "Intro.");
/// assert_eq!(body, "Some details follow here.");
/// ```
pub fn split_title_body(texts: &[String]) -> (String, String) {
    let texts: Vec<String> = texts
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect();

    match texts.as_slice() {
        [] => (String::new(), String::new()),
        [single] => split_single(single),
        [first, rest @ ..] => (first.clone(), rest.join("\n")),
    }
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace(['\r', '\x0B'], "\n")
        .trim()
        .to_string()
}

fn split_single(text: &str) -> (String, String) {
    if let Some((title, body)) = split_blank_line(text) {
        return (title, body);
    }
    if let Some((title, body)) = text.split_once('\n') {
        return (title.trim().to_string(), body.trim().to_string());
    }
    if let Some(end) = sentence_end(text) {
        let (title, body) = text.split_at(end);
        if !body.trim().is_empty() {
            return (title.trim().to_string(), body.trim().to_string());
        }
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let cut = words.len().min(TITLE_WORD_LIMIT);
    (words[..cut].join(" "), words[cut..].join(" "))
}

/// Split at the first line holding only whitespace.
fn split_blank_line(text: &str) -> Option<(String, String)> {
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');
    // The first line can never be the separator
    offset += lines.next()?.len();
    for line in lines {
        if line.trim().is_empty() {
            let title = text[..offset].trim();
            let body = text[offset + line.len()..].trim();
            if !title.is_empty() && !body.is_empty() {
                return Some((title.to_string(), body.to_string()));
            }
        }
        offset += line.len();
    }
    None
}

/// Byte offset just past the first `.`, `!` or `?` followed by whitespace.
fn sentence_end(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace())
        {
            return Some(i + c.len_utf8());
        }
    }
    None
}

/// Title and body shapes for a slide without shape-level text.
pub fn synthesize_title_body(texts: &[String], size: SlideSize) -> Vec<Shape> {
    let (title, body) = split_title_body(texts);
    let (w, h) = (size.width as f64, size.height as f64);
    let mut shapes = Vec::with_capacity(2);

    if !title.is_empty() {
        let style = RunStyle {
            font_size: Some(TITLE_FONT_SIZE),
            font_weight: Some(FontWeight::Bold),
            ..Default::default()
        };
        shapes.push(Shape::Text {
            props: ShapeProps::new(BoundingBox::from_f64(w * 0.05, h * 0.05, w * 0.9, h * 0.15)),
            text: text_to_body(&title.replace('\n', "\r"), TextAlign::Left, &style),
        });
    }

    if !body.is_empty() {
        let style = RunStyle {
            font_size: Some(BODY_FONT_SIZE),
            font_weight: Some(FontWeight::Normal),
            ..Default::default()
        };
        shapes.push(Shape::Text {
            props: ShapeProps::new(BoundingBox::from_f64(w * 0.05, h * 0.22, w * 0.9, h * 0.7)),
            text: text_to_body(&body.replace('\n', "\r"), TextAlign::Left, &style),
        });
    }

    shapes
}
