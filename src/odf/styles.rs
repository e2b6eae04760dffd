//! Named styles of an OpenDocument presentation.
//!
//! Styles come from `styles.xml` (common and automatic styles) and from the
//! automatic styles of `content.xml`; both are loaded into one table keyed
//! by style name. A style's effective properties are those of its family's
//! `style:default-style`, then each ancestor along `style:parent-style-name`,
//! then its own. Resolution is memoized per table, and a parent chain that
//! loops back on itself stops at the style already being resolved.
//!
//! Properties are kept as a flat map keyed by attribute local name
//! (`font-size`, `fill-color`, `margin-left`...), regardless of which
//! `style:*-properties` element declared them.

use super::lists::ListStyle;
use crate::common::RGBColor;
use crate::common::unit::{length_to_pt, length_to_px};
use crate::common::xml::{XmlElement, merge_attributes};
use crate::presentation::{
    Fill, FontStyle, FontWeight, RunStyle, SlideSize, TextAlign, VerticalAlign,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Flattened style properties.
pub type Properties = HashMap<String, String>;

const PROPERTY_ELEMENTS: [&str; 4] = [
    "text-properties",
    "paragraph-properties",
    "graphic-properties",
    "drawing-page-properties",
];

#[derive(Debug, Clone, Default)]
struct RawStyle {
    family: String,
    parent: Option<String>,
    properties: Properties,
}

/// All styles of one document.
#[derive(Debug, Default)]
pub struct StyleSheet {
    styles: HashMap<String, RawStyle>,
    defaults: HashMap<String, Properties>,
    /// `style:font-face` name -> font family
    fonts: HashMap<String, String>,
    list_styles: HashMap<String, ListStyle>,
    /// List styles declared inside a graphic or presentation style
    owned_list_styles: HashMap<String, ListStyle>,
    page_layouts: HashMap<String, SlideSize>,
    resolved: RefCell<HashMap<String, Rc<Properties>>>,
    resolving: RefCell<HashSet<String>>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the font faces, styles, list styles and page layouts of a
    /// document root (`office:document-styles` or `office:document-content`).
    pub fn load(&mut self, root: &XmlElement) {
        if let Some(decls) = root.child("font-face-decls") {
            for face in decls.children_named("font-face") {
                if let (Some(name), Some(family)) = (face.attr("style:name"), face.attr("svg:font-family")) {
                    let family = family.trim_matches(|c| c == '\'' || c == '"');
                    self.fonts.insert(name.to_string(), family.to_string());
                }
            }
        }

        for container in ["styles", "automatic-styles"] {
            let Some(container) = root.child(container) else {
                continue;
            };
            for el in container.elements() {
                match el.local_name() {
                    "style" => self.add_style(el),
                    "default-style" => {
                        if let Some(family) = el.attr("style:family") {
                            self.defaults
                                .insert(family.to_string(), own_properties(el));
                        }
                    },
                    "list-style" => {
                        if let Some(name) = el.attr("style:name") {
                            self.list_styles
                                .insert(name.to_string(), ListStyle::parse(el));
                        }
                    },
                    "page-layout" => self.add_page_layout(el),
                    _ => {},
                }
            }
        }
        self.resolved.borrow_mut().clear();
    }

    fn add_style(&mut self, el: &XmlElement) {
        let Some(name) = el.attr("style:name") else {
            return;
        };
        if let Some(list) = el
            .elements()
            .filter_map(|props| props.child("list-style"))
            .next()
        {
            self.owned_list_styles
                .insert(name.to_string(), ListStyle::parse(list));
        }
        self.styles.insert(
            name.to_string(),
            RawStyle {
                family: el.attr("style:family").unwrap_or_default().to_string(),
                parent: el.attr("style:parent-style-name").map(str::to_string),
                properties: own_properties(el),
            },
        );
    }

    fn add_page_layout(&mut self, el: &XmlElement) {
        let Some(name) = el.attr("style:name") else {
            return;
        };
        let Some(props) = el.child("page-layout-properties") else {
            return;
        };
        let width = props.attr("fo:page-width").and_then(length_to_px);
        let height = props.attr("fo:page-height").and_then(length_to_px);
        if let (Some(w), Some(h)) = (width, height)
            && w > 0.0
            && h > 0.0
        {
            self.page_layouts.insert(
                name.to_string(),
                SlideSize::new(w.round() as i64, h.round() as i64),
            );
        }
    }

    /// Effective properties of a named style.
    ///
    /// Unknown names resolve to no properties.
    pub fn resolve(&self, name: &str) -> Rc<Properties> {
        if let Some(hit) = self.resolved.borrow().get(name).cloned() {
            return hit;
        }
        let Some(raw) = self.styles.get(name) else {
            log::debug!("Style {} is not defined", name);
            return Rc::default();
        };
        if !self.resolving.borrow_mut().insert(name.to_string()) {
            log::debug!("Style {} inherits from itself", name);
            return Rc::new(raw.properties.clone());
        }

        let mut props = match raw.parent.as_deref() {
            Some(parent) if self.styles.contains_key(parent) => (*self.resolve(parent)).clone(),
            _ => self.family_default(&raw.family),
        };
        props.extend(raw.properties.iter().map(|(k, v)| (k.clone(), v.clone())));

        self.resolving.borrow_mut().remove(name);
        let props = Rc::new(props);
        self.resolved
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&props));
        props
    }

    /// Default properties of a style family.
    fn family_default(&self, family: &str) -> Properties {
        self.defaults.get(family).cloned().unwrap_or_default()
    }

    /// A named list style, with the name as stored in the table.
    pub fn list_style(&self, name: &str) -> Option<(&str, &ListStyle)> {
        self.list_styles
            .get_key_value(name)
            .map(|(key, style)| (key.as_str(), style))
    }

    /// List style declared by a graphic or presentation style or one of its
    /// ancestors.
    pub fn owned_list_style(&self, name: &str) -> Option<(&str, &ListStyle)> {
        let mut current = Some(name);
        let mut seen = HashSet::new();
        while let Some(style) = current {
            if !seen.insert(style) {
                break;
            }
            if let Some((key, list)) = self.owned_list_styles.get_key_value(style) {
                return Some((key.as_str(), list));
            }
            current = self.styles.get(style).and_then(|raw| raw.parent.as_deref());
        }
        None
    }

    pub fn page_layout(&self, name: &str) -> Option<SlideSize> {
        self.page_layouts.get(name).copied()
    }

    /// Run formatting described by a property map.
    pub fn run_style(&self, props: &Properties) -> RunStyle {
        let font_family = props
            .get("font-name")
            .and_then(|name| self.fonts.get(name).cloned().or_else(|| Some(name.clone())))
            .or_else(|| {
                props
                    .get("font-family")
                    .map(|f| f.trim_matches(|c| c == '\'' || c == '"').to_string())
            });
        RunStyle {
            font_size: props.get("font-size").and_then(|v| length_to_pt(v)),
            font_weight: props.get("font-weight").map(|v| parse_weight(v)),
            font_style: props.get("font-style").map(|v| match v.as_str() {
                "italic" | "oblique" => FontStyle::Italic,
                _ => FontStyle::Normal,
            }),
            color: props.get("color").and_then(|v| RGBColor::from_hex(v)),
            font_family,
        }
    }
}

fn own_properties(el: &XmlElement) -> Properties {
    merge_attributes(
        el.elements()
            .filter(|child| PROPERTY_ELEMENTS.contains(&child.local_name())),
    )
}

fn parse_weight(value: &str) -> FontWeight {
    match value {
        "bold" | "bolder" => FontWeight::Bold,
        numeric => match atoi_simd::parse::<u32>(numeric.as_bytes()) {
            Ok(weight) if weight >= 600 => FontWeight::Bold,
            _ => FontWeight::Normal,
        },
    }
}

/// Paragraph alignment.
pub fn text_align(props: &Properties) -> Option<TextAlign> {
    props.get("text-align").map(|v| match v.as_str() {
        "center" => TextAlign::Center,
        "end" | "right" => TextAlign::Right,
        _ => TextAlign::Left,
    })
}

/// A length property in pixels.
pub fn length_px(props: &Properties, key: &str) -> Option<f64> {
    props.get(key).and_then(|v| length_to_px(v))
}

/// Solid fill or explicit absence of fill.
pub fn fill(props: &Properties) -> Option<Fill> {
    match props.get("fill").map(String::as_str) {
        Some("none") => Some(Fill::None),
        Some("solid") => props
            .get("fill-color")
            .and_then(|v| RGBColor::from_hex(v))
            .map(|color| Fill::Solid { color }),
        _ => None,
    }
}

/// Background colour of a drawing-page style.
pub fn background(props: &Properties) -> Option<RGBColor> {
    match fill(props)? {
        Fill::Solid { color } => Some(color),
        Fill::None => None,
    }
}

pub fn vertical_align(props: &Properties) -> Option<VerticalAlign> {
    props
        .get("textarea-vertical-align")
        .map(|v| VerticalAlign::from_keyword(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    const STYLES: &str = r##"<office:document-styles>
        <office:font-face-decls>
            <style:font-face style:name="Liberation Sans" svg:font-family="'Liberation Sans'"/>
        </office:font-face-decls>
        <office:styles>
            <style:default-style style:family="graphic">
                <style:text-properties fo:font-size="18pt" fo:color="#000000"/>
            </style:default-style>
            <style:style style:name="standard" style:family="graphic">
                <style:graphic-properties draw:fill="solid" draw:fill-color="#729fcf"/>
                <style:text-properties style:font-name="Liberation Sans"/>
            </style:style>
            <style:style style:name="heading" style:family="graphic" style:parent-style-name="standard">
                <style:text-properties fo:font-size="32pt" fo:font-weight="bold"/>
                <style:paragraph-properties fo:text-align="center" fo:margin-left="1in"/>
            </style:style>
            <style:style style:name="loop-a" style:family="graphic" style:parent-style-name="loop-b">
                <style:text-properties fo:font-style="italic"/>
            </style:style>
            <style:style style:name="loop-b" style:family="graphic" style:parent-style-name="loop-a">
                <style:text-properties fo:font-weight="700"/>
            </style:style>
            <style:style style:name="outline1" style:family="presentation">
                <style:graphic-properties>
                    <text:list-style style:name="outline1">
                        <text:list-level-style-bullet text:level="1" text:bullet-char="●"/>
                    </text:list-style>
                </style:graphic-properties>
            </style:style>
            <style:style style:name="outline2" style:family="presentation" style:parent-style-name="outline1"/>
        </office:styles>
        <office:automatic-styles>
            <style:page-layout style:name="PM1">
                <style:page-layout-properties fo:page-width="28cm" fo:page-height="15.75cm"/>
            </style:page-layout>
        </office:automatic-styles>
    </office:document-styles>"##;

    fn sheet() -> StyleSheet {
        let mut sheet = StyleSheet::new();
        sheet.load(&XmlDocument::parse(STYLES).unwrap().root);
        sheet
    }

    #[test]
    fn test_cascade_through_parent_and_default() {
        let sheet = sheet();
        let props = sheet.resolve("heading");
        let run = sheet.run_style(&props);
        assert_eq!(run.font_size, Some(32.0));
        assert_eq!(run.font_weight, Some(FontWeight::Bold));
        assert_eq!(run.color, Some(RGBColor::BLACK));
        assert_eq!(run.font_family.as_deref(), Some("Liberation Sans"));
        assert_eq!(text_align(&props), Some(TextAlign::Center));
        assert_eq!(length_px(&props, "margin-left"), Some(96.0));
        assert_eq!(
            fill(&props),
            Some(Fill::Solid {
                color: RGBColor::new(0x72, 0x9f, 0xcf)
            })
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let sheet = sheet();
        let first = sheet.resolve("heading");
        let second = sheet.resolve("heading");
        assert_eq!(*first, *second);
        assert_eq!(first.get("font-size").map(String::as_str), Some("32pt"));
        assert_eq!(sheet.resolve("standard").get("font-size").map(String::as_str), Some("18pt"));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let sheet = sheet();
        let props = sheet.resolve("loop-a");
        assert_eq!(props.get("font-style").map(String::as_str), Some("italic"));
        assert_eq!(props.get("font-weight").map(String::as_str), Some("700"));
        assert!(sheet.resolve("missing").is_empty());
    }

    #[test]
    fn test_owned_list_style_inherited() {
        let sheet = sheet();
        assert!(sheet.owned_list_style("outline2").is_some());
        assert!(sheet.owned_list_style("standard").is_none());
    }

    #[test]
    fn test_page_layout() {
        let sheet = sheet();
        let size = sheet.page_layout("PM1").unwrap();
        assert_eq!(size, SlideSize::new(1058, 595));
    }
}
