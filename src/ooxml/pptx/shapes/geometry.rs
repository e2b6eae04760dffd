/// Shape geometry: transforms, group coordinate spaces and placeholders.
use crate::common::unit::emu_to_px;
use crate::common::xml::XmlElement;
use crate::presentation::BoundingBox;

/// Position and size in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmuRect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl EmuRect {
    /// Read `a:off`/`a:ext` of an `a:xfrm` (or `p:xfrm`) element.
    ///
    /// A missing offset is taken as the origin; a missing extent makes the
    /// transform unusable.
    pub fn from_xfrm(xfrm: &XmlElement) -> Option<Self> {
        let (x, y) = xfrm
            .child("off")
            .and_then(|off| pair(off, "x", "y"))
            .unwrap_or((0, 0));
        let (cx, cy) = pair(xfrm.child("ext")?, "cx", "cy")?;
        Some(Self { x, y, cx, cy })
    }

    /// Convert to a pixel box.
    pub fn to_box(&self) -> BoundingBox {
        BoundingBox::new(
            emu_to_px(self.x),
            emu_to_px(self.y),
            emu_to_px(self.cx),
            emu_to_px(self.cy),
        )
    }
}

fn pair(el: &XmlElement, a: &str, b: &str) -> Option<(i64, i64)> {
    let parse = |name: &str| {
        el.attr(name)
            .and_then(|v| atoi_simd::parse::<i64>(v.as_bytes()).ok())
    };
    Some((parse(a)?, parse(b)?))
}

/// The transform element of any shape kind.
///
/// Shapes and pictures keep it in `p:spPr`, groups in `p:grpSpPr` and
/// graphic frames directly under the frame.
pub fn shape_xfrm(shape: &XmlElement) -> Option<&XmlElement> {
    shape
        .child("spPr")
        .or_else(|| shape.child("grpSpPr"))
        .and_then(|pr| pr.child("xfrm"))
        .or_else(|| shape.child("xfrm"))
}

/// Maps a group's child coordinate space onto slide coordinates.
///
/// A child point `p` lands at `off + (p - chOff) * ext / chExt`, stored as
/// a scale and a translation per axis so nested groups compose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    scale_x: f64,
    scale_y: f64,
    dx: f64,
    dy: f64,
}

impl GroupTransform {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// The transform a `p:grpSp` applies to its children.
    pub fn from_group(group: &XmlElement) -> Self {
        let Some(xfrm) = shape_xfrm(group) else {
            return Self::IDENTITY;
        };
        let Some(rect) = EmuRect::from_xfrm(xfrm) else {
            return Self::IDENTITY;
        };
        let (ch_x, ch_y) = xfrm
            .child("chOff")
            .and_then(|off| pair(off, "x", "y"))
            .unwrap_or((rect.x, rect.y));
        let (ch_cx, ch_cy) = xfrm
            .child("chExt")
            .and_then(|ext| pair(ext, "cx", "cy"))
            .unwrap_or((rect.cx, rect.cy));

        let scale = |ext: i64, ch: i64| if ch > 0 { ext as f64 / ch as f64 } else { 1.0 };
        let scale_x = scale(rect.cx, ch_cx);
        let scale_y = scale(rect.cy, ch_cy);
        Self {
            scale_x,
            scale_y,
            dx: rect.x as f64 - ch_x as f64 * scale_x,
            dy: rect.y as f64 - ch_y as f64 * scale_y,
        }
    }

    /// `self` applied after `inner`.
    pub fn compose(&self, inner: &GroupTransform) -> Self {
        Self {
            scale_x: self.scale_x * inner.scale_x,
            scale_y: self.scale_y * inner.scale_y,
            dx: self.scale_x * inner.dx + self.dx,
            dy: self.scale_y * inner.dy + self.dy,
        }
    }

    pub fn apply(&self, rect: EmuRect) -> EmuRect {
        EmuRect {
            x: (rect.x as f64 * self.scale_x + self.dx).round() as i64,
            y: (rect.y as f64 * self.scale_y + self.dy).round() as i64,
            cx: (rect.cx as f64 * self.scale_x).round() as i64,
            cy: (rect.cy as f64 * self.scale_y).round() as i64,
        }
    }
}

/// Placeholder identity of a shape (`p:nvPr/p:ph`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placeholder {
    /// `type` attribute; absent means a generic content placeholder
    pub kind: Option<String>,
    pub idx: Option<u32>,
}

impl Placeholder {
    /// Read the placeholder marker of a shape, if it has one.
    pub fn of(shape: &XmlElement) -> Option<Self> {
        let ph = shape
            .elements()
            .find(|child| child.local_name().starts_with("nv"))?
            .child("nvPr")?
            .child("ph")?;
        Some(Self {
            kind: ph.attr("type").map(str::to_string),
            idx: ph
                .attr("idx")
                .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok()),
        })
    }

    /// Title and centred-title placeholders.
    pub fn is_title(&self) -> bool {
        matches!(self.kind.as_deref(), Some("title" | "ctrTitle"))
    }

    /// Kind used for matching across slide, layout and master.
    fn family(&self) -> &str {
        match self.kind.as_deref() {
            Some("title" | "ctrTitle") => "title",
            Some("subTitle" | "body" | "obj") | None => "body",
            Some(other) => other,
        }
    }
}

/// Placeholder positions declared by a layout or master.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderBounds {
    entries: Vec<(Placeholder, EmuRect)>,
}

impl PlaceholderBounds {
    /// Collect the placeholders with an explicit transform in a shape tree.
    pub fn from_tree(tree: &XmlElement) -> Self {
        let entries = tree
            .elements()
            .filter_map(|shape| {
                let ph = Placeholder::of(shape)?;
                let rect = EmuRect::from_xfrm(shape_xfrm(shape)?)?;
                Some((ph, rect))
            })
            .collect();
        Self { entries }
    }

    /// Bounds of the matching placeholder: same `idx` first, then same kind.
    pub fn find(&self, ph: &Placeholder) -> Option<EmuRect> {
        let by_idx = ph.idx.and_then(|idx| {
            self.entries
                .iter()
                .find(|(other, _)| other.idx == Some(idx))
        });
        by_idx
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(other, _)| other.family() == ph.family())
            })
            .map(|(_, rect)| *rect)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
