/// Text frames (`p:txBody`) of shapes.
///
/// Run formatting is layered: the placeholder defaults, then the body's list
/// style for the paragraph level, then the paragraph's `a:defRPr`, then the
/// run's own `a:rPr`. Each layer only overrides the fields it sets.
use crate::common::unit::EMUS_PER_PX;
use crate::common::xml::XmlElement;
use crate::ooxml::pptx::color::ColorContext;
use crate::presentation::{
    Bullet, FontStyle, FontWeight, Paragraph, RunStyle, TextAlign, TextBody, VerticalAlign,
};
use std::collections::HashMap;

/// Font size for title placeholders without an explicit size.
pub const TITLE_FONT_SIZE: f64 = 44.0;
/// Font size for every other text without an explicit size.
pub const BODY_FONT_SIZE: f64 = 28.0;

/// Base run style of a shape, before any text formatting is applied.
pub fn placeholder_defaults(is_title: bool) -> RunStyle {
    if is_title {
        RunStyle {
            font_size: Some(TITLE_FONT_SIZE),
            font_weight: Some(FontWeight::Bold),
            ..Default::default()
        }
    } else {
        RunStyle {
            font_size: Some(BODY_FONT_SIZE),
            ..Default::default()
        }
    }
}

/// Read a run property element (`a:rPr`, `a:defRPr`, `a:endParaRPr`).
pub fn run_style(rpr: &XmlElement, colors: &ColorContext) -> RunStyle {
    let flag = |name: &str| rpr.attr(name).map(|v| v == "1" || v == "true");
    RunStyle {
        font_size: rpr
            .attr("sz")
            .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
            .map(|hundredths| hundredths as f64 / 100.0),
        font_weight: flag("b").map(|b| if b { FontWeight::Bold } else { FontWeight::Normal }),
        font_style: flag("i").map(|i| if i { FontStyle::Italic } else { FontStyle::Normal }),
        color: rpr.child("solidFill").and_then(|fill| colors.resolve(fill)),
        font_family: rpr
            .child("latin")
            .and_then(|latin| latin.attr("typeface"))
            .and_then(|typeface| colors.font(typeface)),
    }
}

/// Per-level auto-numbering counters of one text body.
///
/// A counter runs while paragraphs at its level keep the same numbering
/// scheme. A paragraph at a shallower level, or an unnumbered paragraph at
/// the same level, ends the sequence.
#[derive(Debug, Default)]
struct AutoNumbering {
    counters: HashMap<u32, (String, u32)>,
}

impl AutoNumbering {
    /// Record a paragraph at `level` and return its position in the running
    /// sequence (0-based) when it is numbered with `scheme`.
    fn next(&mut self, level: u32, scheme: Option<&str>) -> Option<u32> {
        self.counters.retain(|&l, _| l <= level);
        let Some(scheme) = scheme else {
            self.counters.remove(&level);
            return None;
        };
        let entry = self
            .counters
            .entry(level)
            .or_insert_with(|| (scheme.to_string(), 0));
        if entry.0 != scheme {
            *entry = (scheme.to_string(), 0);
        }
        let position = entry.1;
        entry.1 += 1;
        Some(position)
    }
}

/// Prefix and suffix of an `a:buAutoNum` scheme.
fn auto_number_affixes(scheme: &str) -> (&'static str, &'static str) {
    if scheme.ends_with("ParenBoth") {
        ("(", ")")
    } else if scheme.ends_with("ParenR") {
        ("", ")")
    } else if scheme.ends_with("Period") {
        ("", ".")
    } else if scheme.ends_with("Minus") {
        ("- ", " -")
    } else {
        ("", "")
    }
}

#[inline]
fn emu_attr_px(el: &XmlElement, name: &str) -> Option<f64> {
    el.attr(name)
        .and_then(|v| atoi_simd::parse::<i64>(v.as_bytes()).ok())
        .map(|emu| emu as f64 / EMUS_PER_PX as f64)
}

/// Convert a `p:txBody` into the model's text body.
pub fn parse_text_body(tx_body: &XmlElement, base: &RunStyle, colors: &ColorContext) -> TextBody {
    let vertical_align = tx_body
        .child("bodyPr")
        .and_then(|pr| pr.attr("anchor"))
        .map(VerticalAlign::from_keyword)
        .unwrap_or_default();
    let list_style = tx_body.child("lstStyle");
    let mut numbering = AutoNumbering::default();

    let paragraphs = tx_body
        .children_named("p")
        .map(|p| parse_paragraph(p, base, list_style, colors, &mut numbering))
        .collect();

    TextBody {
        paragraphs,
        vertical_align,
    }
}

fn parse_paragraph(
    p: &XmlElement,
    base: &RunStyle,
    list_style: Option<&XmlElement>,
    colors: &ColorContext,
    numbering: &mut AutoNumbering,
) -> Paragraph {
    let ppr = p.child("pPr");
    let level = ppr
        .and_then(|pr| pr.attr("lvl"))
        .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
        .unwrap_or(0)
        .min(8);
    let level_style = list_style.and_then(|ls| ls.child(&format!("lvl{}pPr", level + 1)));

    // Paragraph properties, falling back to the list style of the level
    let attr = |name: &str| {
        ppr.and_then(|pr| pr.attr(name))
            .or_else(|| level_style.and_then(|ls| ls.attr(name)))
    };

    let mut style = base.clone();
    if let Some(def) = level_style.and_then(|ls| ls.child("defRPr")) {
        style = style.merged_with(&run_style(def, colors));
    }
    if let Some(def) = ppr.and_then(|pr| pr.child("defRPr")) {
        style = style.merged_with(&run_style(def, colors));
    }

    let mut paragraph = Paragraph {
        align: attr("algn").map(TextAlign::from_keyword).unwrap_or_default(),
        level,
        mar_l: ppr
            .and_then(|pr| emu_attr_px(pr, "marL"))
            .or_else(|| level_style.and_then(|ls| emu_attr_px(ls, "marL")))
            .unwrap_or(0.0),
        indent: ppr
            .and_then(|pr| emu_attr_px(pr, "indent"))
            .or_else(|| level_style.and_then(|ls| emu_attr_px(ls, "indent")))
            .unwrap_or(0.0),
        ..Default::default()
    };

    for child in p.elements() {
        match child.local_name() {
            "r" | "fld" => {
                let run = match child.child("rPr") {
                    Some(rpr) => style.merged_with(&run_style(rpr, colors)),
                    None => style.clone(),
                };
                let text = child.child("t").map(XmlElement::text).unwrap_or_default();
                paragraph.push_text(&text, &run);
            },
            "br" => {
                let run = match child.child("rPr") {
                    Some(rpr) => style.merged_with(&run_style(rpr, colors)),
                    None => style.clone(),
                };
                paragraph.push_text("\n", &run);
            },
            _ => {},
        }
    }

    paragraph.bullet = bullet_for(ppr, level_style, level, &paragraph, numbering);
    paragraph
}

/// Resolve the bullet of a paragraph.
///
/// Empty paragraphs never show a bullet and do not advance numbering.
fn bullet_for(
    ppr: Option<&XmlElement>,
    level_style: Option<&XmlElement>,
    level: u32,
    paragraph: &Paragraph,
    numbering: &mut AutoNumbering,
) -> Option<Bullet> {
    let bullet_el = |pr: &XmlElement| {
        pr.elements()
            .find(|c| matches!(c.local_name(), "buNone" | "buChar" | "buAutoNum"))
            .cloned()
    };
    let declared = ppr
        .and_then(bullet_el)
        .or_else(|| level_style.and_then(bullet_el));

    if paragraph.runs.is_empty() {
        return None;
    }

    let auto_scheme = declared
        .as_ref()
        .filter(|el| el.is("buAutoNum"))
        .map(|el| el.attr("type").unwrap_or("arabicPeriod").to_string());
    let position = numbering.next(level, auto_scheme.as_deref());

    let declared = declared?;
    match declared.local_name() {
        "buChar" => Some(Bullet::Char {
            char: declared.attr("char").unwrap_or("\u{2022}").to_string(),
        }),
        "buAutoNum" => {
            let start = declared
                .attr("startAt")
                .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
                .unwrap_or(1);
            let scheme = auto_scheme.unwrap_or_default();
            let (prefix, suffix) = auto_number_affixes(&scheme);
            Some(Bullet::Auto {
                index: start + position.unwrap_or(0),
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            })
        },
        _ => None,
    }
}
