/// DrawingML colour and fill resolution.
///
/// Colours appear as one child of a colour container (`a:solidFill`,
/// `a:bgRef`, `a:fillRef`, a `gs` gradient stop...). Scheme colours are
/// looked up through the master's colour map and the theme.
use crate::common::RGBColor;
use crate::common::xml::XmlElement;
use crate::ooxml::pptx::parts::Theme;
use crate::presentation::Fill;
use std::collections::HashMap;

/// DrawingML percentages are expressed in 1/1000 of a percent.
const PERCENT: f64 = 100_000.0;

/// Colour map used when a master declares none.
const DEFAULT_COLOR_MAP: [(&str, &str); 4] =
    [("bg1", "lt1"), ("tx1", "dk1"), ("bg2", "lt2"), ("tx2", "dk2")];

/// Theme colours and fonts as seen from one slide.
#[derive(Debug, Clone, Default)]
pub struct ColorContext {
    theme: Theme,
    /// `p:clrMap` of the master, e.g. `bg1 -> lt1`
    color_map: HashMap<String, String>,
}

impl ColorContext {
    /// Combine a theme with the master's `p:clrMap` element.
    pub fn new(theme: Theme, clr_map: Option<&XmlElement>) -> Self {
        let mut color_map: HashMap<String, String> = DEFAULT_COLOR_MAP
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(map) = clr_map {
            for (key, value) in &map.attributes {
                color_map.insert(key.clone(), value.clone());
            }
        }
        Self { theme, color_map }
    }

    /// Look up a scheme colour name (`accent1`, `tx1`, ...).
    pub fn scheme_color(&self, name: &str) -> Option<RGBColor> {
        let slot = self.color_map.get(name).map_or(name, String::as_str);
        self.theme.colors.get(slot).copied()
    }

    /// Resolve a theme font reference.
    pub fn font(&self, typeface: &str) -> Option<String> {
        self.theme.resolve_font(typeface).map(str::to_string)
    }

    /// Colour of the first colour element under `container`.
    pub fn resolve(&self, container: &XmlElement) -> Option<RGBColor> {
        container
            .elements()
            .find_map(|child| self.color_element(child))
    }

    /// Colour of a single colour element with its modifiers applied.
    pub fn color_element(&self, el: &XmlElement) -> Option<RGBColor> {
        let base = match el.local_name() {
            "srgbClr" => RGBColor::from_hex(el.attr("val")?),
            "sysClr" => el
                .attr("lastClr")
                .and_then(RGBColor::from_hex)
                .or_else(|| match el.attr("val")? {
                    "window" => Some(RGBColor::WHITE),
                    _ => Some(RGBColor::BLACK),
                }),
            "schemeClr" => {
                let name = el.attr("val")?;
                let color = self.scheme_color(name);
                if color.is_none() {
                    log::debug!("Scheme colour {} not in theme", name);
                }
                color
            },
            "prstClr" => preset_color(el.attr("val")?),
            "scrgbClr" => {
                let channel = |name: &str| {
                    let v = el.attr(name).and_then(parse_int).unwrap_or(0) as f64;
                    (v / PERCENT * 255.0).round().clamp(0.0, 255.0) as u8
                };
                Some(RGBColor::new(channel("r"), channel("g"), channel("b")))
            },
            _ => None,
        }?;
        Some(apply_modifiers(base, el))
    }

    /// Fill declared by a shape's `p:spPr`, falling back to the style's
    /// `a:fillRef` when the properties declare no fill at all.
    pub fn shape_fill(&self, sp_pr: Option<&XmlElement>, style: Option<&XmlElement>) -> Option<Fill> {
        if let Some(fill) = sp_pr.and_then(|pr| self.fill_of(pr)) {
            return Some(fill);
        }
        let fill_ref = style?.child("fillRef")?;
        if fill_ref.attr("idx").and_then(parse_int) == Some(0) {
            return Some(Fill::None);
        }
        self.resolve(fill_ref).map(|color| Fill::Solid { color })
    }

    /// Fill from the fill element children of a properties element.
    ///
    /// Gradients are approximated by their first stop. Picture and pattern
    /// fills are not expressible and yield `None`.
    pub fn fill_of(&self, props: &XmlElement) -> Option<Fill> {
        for child in props.elements() {
            match child.local_name() {
                "noFill" => return Some(Fill::None),
                "solidFill" => return self.resolve(child).map(|color| Fill::Solid { color }),
                "gradFill" => {
                    return child
                        .first_descendant("gs")
                        .and_then(|stop| self.resolve(stop))
                        .map(|color| Fill::Solid { color });
                },
                "blipFill" | "pattFill" | "grpFill" => return None,
                _ => {},
            }
        }
        None
    }

    /// Background colour of a `p:bg` element.
    pub fn background(&self, bg: &XmlElement) -> Option<RGBColor> {
        if let Some(bg_pr) = bg.child("bgPr") {
            return match self.fill_of(bg_pr)? {
                Fill::Solid { color } => Some(color),
                Fill::None => None,
            };
        }
        self.resolve(bg.child("bgRef")?)
    }
}

#[inline]
fn parse_int(value: &str) -> Option<i64> {
    atoi_simd::parse::<i64>(value.as_bytes()).ok()
}

fn preset_color(name: &str) -> Option<RGBColor> {
    let hex = match name {
        "black" => "000000",
        "white" => "FFFFFF",
        "red" => "FF0000",
        "green" => "008000",
        "lime" => "00FF00",
        "blue" => "0000FF",
        "yellow" => "FFFF00",
        "gray" | "grey" => "808080",
        "orange" => "FFA500",
        _ => return None,
    };
    RGBColor::from_hex(hex)
}

/// Apply `lumMod`/`lumOff`/`tint`/`shade` children of a colour element.
fn apply_modifiers(color: RGBColor, el: &XmlElement) -> RGBColor {
    let mut color = color;
    let mut lum_mod = None;
    let mut lum_off = None;

    for modifier in el.elements() {
        let Some(value) = modifier.attr("val").and_then(parse_int) else {
            continue;
        };
        let amount = value as f64 / PERCENT;
        match modifier.local_name() {
            "lumMod" => lum_mod = Some(amount),
            "lumOff" => lum_off = Some(amount),
            "shade" => color = map_channels(color, |c| c * amount),
            "tint" => color = map_channels(color, |c| c + (255.0 - c) * (1.0 - amount)),
            _ => {},
        }
    }

    if lum_mod.is_some() || lum_off.is_some() {
        let (h, s, l) = rgb_to_hsl(color);
        let l = (l * lum_mod.unwrap_or(1.0) + lum_off.unwrap_or(0.0)).clamp(0.0, 1.0);
        color = hsl_to_rgb(h, s, l);
    }
    color
}

fn map_channels(color: RGBColor, f: impl Fn(f64) -> f64) -> RGBColor {
    let ch = |c: u8| f(c as f64).round().clamp(0.0, 255.0) as u8;
    RGBColor::new(ch(color.r), ch(color.g), ch(color.b))
}

fn rgb_to_hsl(color: RGBColor) -> (f64, f64, f64) {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RGBColor {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return RGBColor::new(v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    RGBColor::new(hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0))
}
