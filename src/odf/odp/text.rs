//! Text content of frames and drawn shapes.
//!
//! Paragraph formatting cascades frame style -> paragraph style -> span
//! style. Whitespace inside paragraphs collapses the way ODF prescribes;
//! `text:s`, `text:tab` and `text:line-break` insert literal spaces, tabs
//! and line breaks.

use crate::common::xml::{XmlElement, XmlNode};
use crate::odf::lists::{ListStyle, Numbering};
use crate::odf::styles::{self, Properties, StyleSheet};
use crate::presentation::{Paragraph, RunStyle, TextBody};

/// Upper bound for `text:s/@text:c`.
const MAX_SPACES: usize = 1024;

/// List style in effect for a text container.
#[derive(Clone, Copy)]
pub struct ActiveList<'a> {
    /// Counter key
    pub name: &'a str,
    pub style: &'a ListStyle,
}

/// Converts the text of one frame or shape.
pub struct TextBuilder<'a> {
    pub styles: &'a StyleSheet,
    /// Resolved properties of the owning frame
    pub frame: &'a Properties,
    /// List style used by lists that name none
    pub default_list: Option<ActiveList<'a>>,
    /// Lists show no bullets (title frames)
    pub suppress_bullets: bool,
}

impl<'a> TextBuilder<'a> {
    /// Convert the paragraph-level children (`text:p`, `text:h`, `text:list`)
    /// of `container`.
    pub fn build(&self, container: &XmlElement, numbering: &mut Numbering) -> TextBody {
        let mut body = TextBody::default();
        if let Some(align) = styles::vertical_align(self.frame) {
            body.vertical_align = align;
        }
        self.collect(container, numbering, &mut body.paragraphs);
        body
    }

    fn collect(&self, container: &XmlElement, numbering: &mut Numbering, out: &mut Vec<Paragraph>) {
        for child in container.elements() {
            match child.local_name() {
                "p" | "h" => out.push(self.paragraph(child, 0)),
                "list" => self.list(child, 1, None, numbering, out),
                _ => {},
            }
        }
    }

    fn list(
        &self,
        list: &XmlElement,
        depth: u32,
        inherited: Option<ActiveList<'a>>,
        numbering: &mut Numbering,
        out: &mut Vec<Paragraph>,
    ) {
        let named = list.attr("text:style-name").and_then(|name| {
            let entry = self.styles.list_style(name);
            if entry.is_none() {
                log::debug!("List style {} is not defined", name);
            }
            entry.map(|(name, style)| ActiveList { name, style })
        });
        let active = named.or(inherited).or(self.default_list);
        let continues = list.attr("text:continue-numbering") == Some("true")
            || list.attr("text:continue-list").is_some();
        if let Some(active) = active {
            numbering.start_list(active.name, depth, continues);
        }

        for item in list.elements() {
            let is_header = match item.local_name() {
                "list-item" => false,
                "list-header" => true,
                _ => continue,
            };
            let mut bullet = match active {
                Some(active) if !is_header && !self.suppress_bullets => {
                    numbering.bullet(active.name, active.style, depth)
                },
                Some(active) => {
                    numbering.advance(active.name, depth);
                    None
                },
                None => None,
            };

            for child in item.elements() {
                match child.local_name() {
                    "p" | "h" => {
                        let mut paragraph = self.paragraph(child, depth - 1);
                        // Only the first paragraph of an item carries the bullet
                        if paragraph.has_visible_text() {
                            paragraph.bullet = bullet.take();
                        } else {
                            bullet = None;
                        }
                        out.push(paragraph);
                    },
                    "list" => self.list(child, depth + 1, active, numbering, out),
                    _ => {},
                }
            }
        }
    }

    fn paragraph(&self, p: &XmlElement, level: u32) -> Paragraph {
        let mut props = self.frame.clone();
        if let Some(name) = p.attr("text:style-name") {
            props.extend(
                self.styles
                    .resolve(name)
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }

        let mut paragraph = Paragraph {
            align: styles::text_align(&props).unwrap_or_default(),
            level,
            mar_l: styles::length_px(&props, "margin-left").unwrap_or(0.0),
            indent: styles::length_px(&props, "text-indent").unwrap_or(0.0),
            ..Default::default()
        };
        let style = self.styles.run_style(&props);
        let mut space = SpaceState::ParagraphStart;
        self.inline(p, &style, &mut paragraph, &mut space);
        if space == SpaceState::Collapsed {
            trim_trailing_space(&mut paragraph);
        }
        paragraph
    }

    fn inline(&self, el: &XmlElement, style: &RunStyle, paragraph: &mut Paragraph, space: &mut SpaceState) {
        for node in &el.children {
            let child = match node {
                XmlNode::Text(text) => {
                    paragraph.push_text(&collapse(text, space), style);
                    continue;
                },
                XmlNode::Element(child) => child,
            };
            match child.local_name() {
                "span" => {
                    let span_style = match child.attr("text:style-name") {
                        Some(name) => style.merged_with(&self.styles.run_style(&self.styles.resolve(name))),
                        None => style.clone(),
                    };
                    self.inline(child, &span_style, paragraph, space);
                },
                "s" => {
                    let count = child
                        .attr("text:c")
                        .and_then(|v| atoi_simd::parse::<usize>(v.as_bytes()).ok())
                        .unwrap_or(1)
                        .min(MAX_SPACES);
                    paragraph.push_text(&" ".repeat(count), style);
                    *space = SpaceState::AfterSpace;
                },
                "tab" => {
                    paragraph.push_text("\t", style);
                    *space = SpaceState::AfterSpace;
                },
                "line-break" => {
                    paragraph.push_text("\n", style);
                    *space = SpaceState::AfterSpace;
                },
                // Annotations and change tracking carry no visible text
                "annotation" | "tracked-changes" | "note" => {},
                _ => self.inline(child, style, paragraph, space),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpaceState {
    ParagraphStart,
    /// After literal whitespace from `text:s`, `text:tab`...
    AfterSpace,
    /// After a space produced by collapsing
    Collapsed,
    AfterText,
}

/// Collapse runs of XML whitespace into single spaces, dropping whitespace
/// at the start of a paragraph or after an inserted space.
fn collapse(text: &str, state: &mut SpaceState) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            if *state == SpaceState::AfterText {
                out.push(' ');
                *state = SpaceState::Collapsed;
            }
        } else {
            out.push(c);
            *state = SpaceState::AfterText;
        }
    }
    out
}

/// Drop the space collapsing left at the end of a paragraph.
fn trim_trailing_space(paragraph: &mut Paragraph) {
    if let Some(last) = paragraph.runs.last_mut() {
        last.text.pop();
        if last.text.is_empty() {
            paragraph.runs.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;
    use crate::presentation::{Bullet, FontWeight, TextAlign};

    const STYLES: &str = r#"<office:document-content>
        <office:automatic-styles>
            <style:style style:name="P1" style:family="paragraph">
                <style:paragraph-properties fo:text-align="center"/>
            </style:style>
            <style:style style:name="T1" style:family="text">
                <style:text-properties fo:font-weight="bold"/>
            </style:style>
            <text:list-style style:name="L1">
                <text:list-level-style-number text:level="1" style:num-format="1" style:num-suffix=")"/>
                <text:list-level-style-bullet text:level="2" text:bullet-char="*"/>
            </text:list-style>
        </office:automatic-styles>
    </office:document-content>"#;

    fn sheet() -> StyleSheet {
        let mut sheet = StyleSheet::new();
        sheet.load(&XmlDocument::parse(STYLES).unwrap().root);
        sheet
    }

    fn build(sheet: &StyleSheet, xml: &str, suppress: bool) -> TextBody {
        let frame = Properties::new();
        let builder = TextBuilder {
            styles: sheet,
            frame: &frame,
            default_list: None,
            suppress_bullets: suppress,
        };
        let doc = XmlDocument::parse(xml).unwrap();
        builder.build(&doc.root, &mut Numbering::new())
    }

    #[test]
    fn test_spans_and_spacing() {
        let sheet = sheet();
        let body = build(
            &sheet,
            r#"<draw:text-box><text:p text:style-name="P1">
                A&amp;B <text:span text:style-name="T1">bold</text:span><text:s text:c="2"/>x<text:tab/>y<text:line-break/>z
            </text:p></draw:text-box>"#,
            false,
        );
        let p = &body.paragraphs[0];
        assert_eq!(p.align, TextAlign::Center);
        assert_eq!(p.text(), "A&B bold  x\ty\nz");
        assert_eq!(p.runs[1].text, "bold");
        assert_eq!(p.runs[1].style.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn test_numbered_list() {
        let sheet = sheet();
        let xml = r#"<draw:text-box>
            <text:list text:style-name="L1">
                <text:list-header><text:p>Intro</text:p></text:list-header>
                <text:list-item><text:p>one</text:p></text:list-item>
                <text:list-item><text:p>two</text:p>
                    <text:list><text:list-item><text:p>nested</text:p></text:list-item></text:list>
                </text:list-item>
            </text:list>
            <text:list text:style-name="L1"><text:list-item><text:p>again</text:p></text:list-item></text:list>
            <text:p>plain</text:p>
        </draw:text-box>"#;
        let body = build(&sheet, xml, false);
        let bullets: Vec<_> = body.paragraphs.iter().map(|p| p.bullet.clone()).collect();
        let auto = |index| {
            Some(Bullet::Auto {
                index,
                prefix: String::new(),
                suffix: ")".into(),
            })
        };
        assert_eq!(bullets[0], None);
        assert_eq!(bullets[1], auto(2));
        assert_eq!(bullets[2], auto(3));
        assert_eq!(bullets[3], Some(Bullet::Char { char: "*".into() }));
        assert_eq!(body.paragraphs[3].level, 1);
        assert_eq!(bullets[4], auto(1));
        assert_eq!(bullets[5], None);

        let suppressed = build(&sheet, xml, true);
        assert!(suppressed.paragraphs.iter().all(|p| p.bullet.is_none()));
    }
}
