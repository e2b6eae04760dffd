//! List styles and list numbering.
//!
//! A `text:list-style` defines one entry per nesting level (1-based in the
//! file): a bullet character, a number format with start value and
//! affixes, or nothing at all. [`Numbering`] keeps the running counters
//! while the paragraphs of a document are visited in order.

use crate::common::xml::XmlElement;
use crate::presentation::Bullet;
use std::collections::HashMap;

/// What one level of a list style puts in front of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLevel {
    Bullet { char: String },
    Number {
        /// `style:num-format`, e.g. `1`, `a`, `I`
        format: String,
        start: u32,
        prefix: String,
        suffix: String,
    },
    None,
}

/// A named `text:list-style`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStyle {
    levels: HashMap<u32, ListLevel>,
}

impl ListStyle {
    /// Read the level definitions of a `text:list-style` element.
    pub fn parse(el: &XmlElement) -> Self {
        let mut levels = HashMap::new();
        for def in el.elements() {
            let Some(level) = def
                .attr("text:level")
                .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
            else {
                continue;
            };
            let entry = match def.local_name() {
                "list-level-style-bullet" => ListLevel::Bullet {
                    char: def.attr("text:bullet-char").unwrap_or("\u{2022}").to_string(),
                },
                "list-level-style-number" => match def.attr("style:num-format") {
                    Some(format) if !format.is_empty() => ListLevel::Number {
                        format: format.to_string(),
                        start: def
                            .attr("text:start-value")
                            .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
                            .unwrap_or(1),
                        prefix: def.attr("style:num-prefix").unwrap_or_default().to_string(),
                        suffix: def.attr("style:num-suffix").unwrap_or_default().to_string(),
                    },
                    _ => ListLevel::None,
                },
                "list-level-style-image" | "list-level-style-none" => ListLevel::None,
                _ => continue,
            };
            levels.insert(level, entry);
        }
        Self { levels }
    }

    /// Definition for a 1-based nesting level.
    pub fn level(&self, level: u32) -> Option<&ListLevel> {
        self.levels.get(&level)
    }
}

/// Running item counters, per list style and level.
#[derive(Debug, Default)]
pub struct Numbering {
    counters: HashMap<(String, u32), u32>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list starts at `level` (1-based).
    ///
    /// Unless the list continues the previous one, the counter of that
    /// level restarts; a top-level list restarts every level of its style.
    pub fn start_list(&mut self, style: &str, level: u32, continue_numbering: bool) {
        if continue_numbering {
            return;
        }
        self.counters
            .retain(|(name, l), _| name != style || (level > 1 && *l < level));
    }

    /// Count one item (or list header) and return how many items, this one
    /// included, the level has seen so far.
    pub fn advance(&mut self, style: &str, level: u32) -> u32 {
        let counter = self.counters.entry((style.to_string(), level)).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Count one item and return its bullet, if the style shows one.
    pub fn bullet(&mut self, style_name: &str, style: &ListStyle, level: u32) -> Option<Bullet> {
        let count = self.advance(style_name, level);
        match style.level(level)? {
            ListLevel::Bullet { char } => Some(Bullet::Char { char: char.clone() }),
            ListLevel::Number {
                start,
                prefix,
                suffix,
                ..
            } => Some(Bullet::Auto {
                index: start + count - 1,
                prefix: prefix.clone(),
                suffix: suffix.clone(),
            }),
            ListLevel::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    fn numbered() -> ListStyle {
        let doc = XmlDocument::parse(
            r#"<text:list-style style:name="L1">
                <text:list-level-style-number text:level="1" style:num-format="1" style:num-suffix="."/>
                <text:list-level-style-bullet text:level="2" text:bullet-char="-"/>
                <text:list-level-style-number text:level="3" style:num-format=""/>
            </text:list-style>"#,
        )
        .unwrap();
        ListStyle::parse(&doc.root)
    }

    fn index(bullet: Option<Bullet>) -> Option<u32> {
        match bullet? {
            Bullet::Auto { index, .. } => Some(index),
            Bullet::Char { .. } => None,
        }
    }

    #[test]
    fn test_parse_levels() {
        let style = numbered();
        assert_eq!(style.level(2), Some(&ListLevel::Bullet { char: "-".into() }));
        assert_eq!(style.level(3), Some(&ListLevel::None));
        assert_eq!(style.level(4), None);
    }

    #[test]
    fn test_counts_and_resets() {
        let style = numbered();
        let mut numbering = Numbering::new();

        numbering.start_list("L1", 1, false);
        let first: Vec<_> = (0..3)
            .map(|_| index(numbering.bullet("L1", &style, 1)))
            .collect();
        assert_eq!(first, [Some(1), Some(2), Some(3)]);

        // A continued list picks up where the last one stopped
        numbering.start_list("L1", 1, true);
        assert_eq!(index(numbering.bullet("L1", &style, 1)), Some(4));

        // A new list with the same style starts over
        numbering.start_list("L1", 1, false);
        assert_eq!(index(numbering.bullet("L1", &style, 1)), Some(1));
    }

    #[test]
    fn test_nested_list_keeps_outer_counter() {
        let style = numbered();
        let mut numbering = Numbering::new();
        numbering.start_list("L1", 1, false);
        numbering.bullet("L1", &style, 1);
        numbering.start_list("L1", 2, false);
        assert_eq!(
            numbering.bullet("L1", &style, 2),
            Some(Bullet::Char { char: "-".into() })
        );
        assert_eq!(index(numbering.bullet("L1", &style, 1)), Some(2));
    }
}
