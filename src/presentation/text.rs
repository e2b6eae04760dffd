//! Text content of a text shape: paragraphs made of styled runs.

use crate::common::RGBColor;
use serde::Serialize;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Parse the alignment keywords used by OOXML (`l`, `ctr`, `r`) and ODF
    /// (`start`, `center`, `end`, ...). Justified text is treated as left.
    pub fn from_keyword(value: &str) -> Self {
        match value {
            "ctr" | "center" | "dist" => Self::Center,
            "r" | "right" | "end" => Self::Right,
            _ => Self::Left,
        }
    }
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn from_keyword(value: &str) -> Self {
        match value {
            "ctr" | "middle" | "center" => Self::Middle,
            "b" | "bottom" => Self::Bottom,
            _ => Self::Top,
        }
    }
}

/// Font weight of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font style of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Character formatting of a run.
///
/// Every field is optional; an absent field inherits from whatever the caller
/// considers the presentation default.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStyle {
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<RGBColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl RunStyle {
    /// Layer `over` on top of `self`, field by field.
    ///
    /// ```
    /// use deckread::{FontWeight, RunStyle};
    ///
    /// let base = RunStyle { font_size: Some(18.0), font_weight: Some(FontWeight::Bold), ..Default::default() };
    /// let over = RunStyle { font_size: Some(24.0), ..Default::default() };
    /// let merged = base.merged_with(&over);
    /// assert_eq!(merged.font_size, Some(24.0));
    /// assert_eq!(merged.font_weight, Some(FontWeight::Bold));
    /// ```
    pub fn merged_with(&self, over: &RunStyle) -> RunStyle {
        RunStyle {
            font_size: over.font_size.or(self.font_size),
            font_weight: over.font_weight.or(self.font_weight),
            font_style: over.font_style.or(self.font_style),
            color: over.color.or(self.color),
            font_family: over.font_family.clone().or_else(|| self.font_family.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == RunStyle::default()
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Paragraph bullet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Bullet {
    /// A literal bullet character
    Char { char: String },
    /// An automatically numbered bullet
    Auto {
        index: u32,
        prefix: String,
        suffix: String,
    },
}

/// A paragraph of text.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub align: TextAlign,
    /// 0-based nesting depth
    pub level: u32,
    /// Left margin in pixels
    pub mar_l: f64,
    /// First-line indent in pixels
    pub indent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, merging into the previous run when the style matches.
    ///
    /// ```
    /// use deckread::{Paragraph, RunStyle};
    ///
    /// let mut p = Paragraph::new();
    /// p.push_text("Hello, ", &RunStyle::default());
    /// p.push_text("world", &RunStyle::default());
    /// assert_eq!(p.runs.len(), 1);
    /// assert_eq!(p.runs[0].text, "Hello, world");
    /// ```
    pub fn push_text(&mut self, text: &str, style: &RunStyle) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.style == *style => last.text.push_str(text),
            _ => self.runs.push(Run::new(text, style.clone())),
        }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether any run carries non-whitespace text.
    pub fn has_visible_text(&self) -> bool {
        self.runs.iter().any(|r| !r.text.trim().is_empty())
    }
}

/// The text content of a text shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
    pub vertical_align: VerticalAlign,
}

impl TextBody {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            vertical_align: VerticalAlign::Top,
        }
    }

    /// Whether the body holds anything worth drawing.
    pub fn has_visible_text(&self) -> bool {
        self.paragraphs.iter().any(Paragraph::has_visible_text)
    }

    /// Plain text, one line per paragraph.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_text_splits_on_style_change() {
        let bold = RunStyle {
            font_weight: Some(FontWeight::Bold),
            ..Default::default()
        };
        let mut p = Paragraph::new();
        p.push_text("a", &RunStyle::default());
        p.push_text("b", &bold);
        p.push_text("c", &bold);
        p.push_text("", &RunStyle::default());
        assert_eq!(p.runs.len(), 2);
        assert_eq!(p.runs[1].text, "bc");
    }

    #[test]
    fn test_whitespace_only_is_not_visible() {
        let mut p = Paragraph::new();
        p.push_text("  \t", &RunStyle::default());
        assert!(!TextBody::new(vec![p]).has_visible_text());
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let shape = RunStyle {
            font_size: Some(18.0),
            color: Some(RGBColor::BLACK),
            ..Default::default()
        };
        let para = RunStyle {
            font_size: Some(20.0),
            ..Default::default()
        };
        let run = RunStyle {
            color: Some(RGBColor::WHITE),
            ..Default::default()
        };
        let merged = shape.merged_with(&para).merged_with(&run);
        assert_eq!(merged.font_size, Some(20.0));
        assert_eq!(merged.color, Some(RGBColor::WHITE));
    }

    #[test]
    fn test_bullet_json() {
        let auto = Bullet::Auto {
            index: 3,
            prefix: String::new(),
            suffix: ".".into(),
        };
        let json = serde_json::to_value(&auto).unwrap();
        assert_eq!(json["type"], "auto");
        assert_eq!(json["index"], 3);

        let json = serde_json::to_value(Bullet::Char { char: "•".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "char", "char": "•"}));
    }
}
