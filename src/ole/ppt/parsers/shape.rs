//! Shape extraction from a slide's drawing.
//!
//! Every `SpContainer` below the slide container becomes at most one shape.
//! A container is turned into a shape only once it shows bounds, text or a
//! picture reference, and a failure inside one container never affects its
//! siblings.
use crate::common::RGBColor;
use crate::common::media::OCTET_STREAM;
use crate::common::unit::emu_to_px;
use crate::images::PicturePool;
use crate::ole::ppt::escher::{
    EscherProperties, SHAPE_TYPE_ELLIPSE, SHAPE_TYPE_ROUND_RECT, ShapeAnchor, ShapeAtom,
};
use crate::ole::ppt::records::{Record, RecordType};
use crate::ole::ppt::text::{ShapeText, TextType, text_to_body};
use crate::presentation::{
    BoundingBox, Fill, Geometry, ImageData, RunStyle, Shape, ShapeProps, SlideSize, TextAlign,
};

/// Fraction of the slide used for a shape whose extent collapsed to zero.
const COLLAPSED_EXTENT_RATIO: f64 = 0.6;

/// What a slide needs to know to build its shapes.
#[derive(Debug, Clone, Copy)]
pub struct SlideContext<'a> {
    pub size: SlideSize,
    /// Outline text strings of this slide
    pub outline_texts: &'a [String],
    pub pictures: &'a PicturePool,
}

/// Shapes and background found in one slide container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideShapes {
    pub shapes: Vec<Shape>,
    pub background: Option<RGBColor>,
}

/// Walk every container below `slide` and collect its shapes in paint order.
pub fn extract_shapes(slide: &Record, ctx: &SlideContext) -> SlideShapes {
    let mut result = SlideShapes::default();
    collect(slide, ctx, &mut result);
    result
}

fn collect(container: &Record, ctx: &SlideContext, out: &mut SlideShapes) {
    for child in container.children() {
        match child.record_type() {
            RecordType::SpContainer => match ShapeBuilder::from_container(&child) {
                Some(builder) if builder.is_background() => {
                    if let Some(color) = builder.fill_color() {
                        out.background = Some(color);
                    }
                },
                Some(builder) => out.shapes.extend(builder.build(ctx)),
                None => {},
            },
            _ if child.is_container() => collect(&child, ctx, out),
            _ => {},
        }
    }
}

/// Everything gathered from one `SpContainer`.
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    atom: Option<ShapeAtom>,
    /// Edges in EMU
    bounds: Option<(i64, i64, i64, i64)>,
    fill: Option<Fill>,
    text: ShapeText,
    blip: Option<u32>,
}

impl ShapeBuilder {
    /// Gather the records of a shape container.
    ///
    /// Returns `None` for group and patriarch shapes.
    pub fn from_container(sp: &Record) -> Option<Self> {
        let atom = sp.child(RecordType::Sp).and_then(|r| ShapeAtom::parse(&r));
        if atom.is_some_and(|a| a.is_structural()) {
            return None;
        }

        let props = EscherProperties::from_container(sp);
        let bounds = props
            .bounds()
            .or_else(|| ShapeAnchor::from_container(sp).map(|anchor| anchor.to_emu()));

        let fill = if props.fill_disabled() {
            Some(Fill::None)
        } else {
            props.fill_color().map(|bgr| Fill::Solid {
                color: RGBColor::from_packed_bgr(bgr),
            })
        };

        let text = sp
            .child(RecordType::ClientTextbox)
            .map(|textbox| ShapeText::from_client_textbox(&textbox))
            .unwrap_or_default();

        Some(Self {
            atom,
            bounds,
            fill,
            text,
            blip: props.blip_reference(),
        })
    }

    #[inline]
    pub fn is_background(&self) -> bool {
        self.atom.is_some_and(|a| a.is_background())
    }

    pub fn fill_color(&self) -> Option<RGBColor> {
        match self.fill {
            Some(Fill::Solid { color }) => Some(color),
            _ => None,
        }
    }

    fn geometry(&self) -> Option<Geometry> {
        match self.atom?.shape_type {
            SHAPE_TYPE_ROUND_RECT => Some(Geometry::RoundRect),
            SHAPE_TYPE_ELLIPSE => Some(Geometry::Ellipse),
            _ => None,
        }
    }

    /// Own text, or the outline text it points at.
    fn resolved_text(&self, ctx: &SlideContext) -> Option<String> {
        if let Some(text) = &self.text.text {
            return Some(text.clone());
        }
        let index = self.text.outline_ref?;
        let text = ctx.outline_texts.get(index);
        if text.is_none() {
            log::debug!("Outline text reference {} out of range", index);
        }
        text.cloned()
    }

    /// Pixel box for the shape.
    pub fn bounding_box(&self, size: SlideSize) -> BoundingBox {
        let Some((left, top, right, bottom)) = self.bounds else {
            return size.fallback_box();
        };
        let (w, h) = (size.width as f64, size.height as f64);

        let mut cx = emu_to_px(right - left);
        let mut cy = emu_to_px(bottom - top);
        if cx <= 0 {
            cx = (w * COLLAPSED_EXTENT_RATIO).round() as i64;
        }
        if cy <= 0 {
            cy = (h * COLLAPSED_EXTENT_RATIO).round() as i64;
        }
        BoundingBox::new(emu_to_px(left), emu_to_px(top), cx, cy)
    }

    /// Turn the gathered records into a model shape.
    pub fn build(&self, ctx: &SlideContext) -> Option<Shape> {
        let text = self.resolved_text(ctx);
        if self.bounds.is_none() && text.is_none() && self.blip.is_none() {
            return None;
        }

        let props = ShapeProps {
            bounds: self.bounding_box(ctx.size),
            is_master: false,
            fill: self.fill,
            geom: self.geometry(),
        };

        if let Some(pib) = self.blip {
            let image = match ctx.pictures.resolve(pib) {
                Some(picture) => picture.to_image_data(),
                None => {
                    log::debug!("Blip reference {} did not resolve", pib);
                    ImageData::new(OCTET_STREAM, Vec::new())
                },
            };
            return Some(Shape::Image { props, image });
        }

        if let Some(text) = text {
            let align = self
                .text
                .text_type
                .map(TextType::alignment)
                .unwrap_or(TextAlign::Left);
            let body = text_to_body(&text, align, &RunStyle::default());
            if body.has_visible_text() {
                return Some(Shape::Text { props, text: body });
            }
        }

        // Bounds alone are enough for a plain shape
        self.bounds.is_some().then_some(Shape::Shape { props })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::ppt::records::RecordCursor;
    use crate::ole::ppt::records::testing::{atom, container, opt, utf16};

    fn sp_atom(shape_type: u16, flags: u32) -> Vec<u8> {
        let mut payload = 1u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&flags.to_le_bytes());
        atom(0xF00A, shape_type, &payload)
    }

    fn build(sp_children: &[u8], outline: &[String]) -> SlideShapes {
        let slide = container(1006, &container(0xF004, sp_children));
        let record = RecordCursor::new(&slide).next().unwrap();
        let pool = PicturePool::default();
        let ctx = SlideContext {
            size: SlideSize::DEFAULT,
            outline_texts: outline,
            pictures: &pool,
        };
        extract_shapes(&record, &ctx)
    }

    #[test]
    fn test_one_pixel_box() {
        let mut children = sp_atom(1, 0);
        children.extend(opt(&[(0x0004, 0), (0x0005, 0), (0x0006, 9525), (0x0007, 9525)]));
        let shapes = build(&children, &[]).shapes;
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind(), "shape");
        assert_eq!(shapes[0].bounds(), BoundingBox::new(0, 0, 1, 1));
        assert_eq!(shapes[0].props().fill, None);
        assert_eq!(shapes[0].props().geom, None);
    }

    #[test]
    fn test_fill_colour_kept() {
        let mut children = sp_atom(1, 0);
        children.extend(opt(&[(0x0004, 0), (0x0005, 0), (0x0006, 9525), (0x0007, 9525), (0x0181, 0xFF)]));
        let shapes = build(&children, &[]).shapes;
        assert_eq!(
            shapes[0].props().fill,
            Some(Fill::Solid {
                color: RGBColor::new(255, 0, 0)
            })
        );
    }

    #[test]
    fn test_zero_extent_widened() {
        let mut children = sp_atom(1, 0);
        children.extend(opt(&[(0x0004, 9525), (0x0005, 0), (0x0006, 9525), (0x0007, 4762)]));
        let shapes = build(&children, &[]).shapes;
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind(), "shape");
        assert_eq!(shapes[0].bounds(), BoundingBox::new(1, 0, 576, 432));
    }

    #[test]
    fn test_ellipse_geometry() {
        let mut children = sp_atom(SHAPE_TYPE_ELLIPSE, 0);
        children.extend(opt(&[(0x0004, 0), (0x0005, 0), (0x0006, 95250), (0x0007, 95250)]));
        let shapes = build(&children, &[]).shapes;
        assert_eq!(shapes[0].props().geom, Some(Geometry::Ellipse));
    }

    #[test]
    fn test_text_without_bounds_is_centred() {
        let textbox = container(0xF00D, &atom(4000, 0, &utf16("Hello")));
        let mut children = sp_atom(202, 0);
        children.extend(textbox);
        let shapes = build(&children, &[]).shapes;
        assert_eq!(shapes[0].kind(), "text");
        assert_eq!(shapes[0].bounds(), BoundingBox::new(96, 144, 768, 432));
        assert_eq!(shapes[0].text_body().unwrap().text(), "Hello");
    }

    #[test]
    fn test_outline_reference() {
        let textbox = container(0xF00D, &atom(3998, 0, &1u32.to_le_bytes()));
        let mut children = sp_atom(1, 0);
        children.extend(textbox);
        let outline = vec!["first".to_string(), "second".to_string()];
        let shapes = build(&children, &outline).shapes;
        assert_eq!(shapes[0].text_body().unwrap().text(), "second");
    }

    #[test]
    fn test_background_and_group_shapes() {
        let mut background = sp_atom(1, 0x0400);
        background.extend(opt(&[(0x0181, 0x00FF00)]));
        let mut group = sp_atom(0, 0x0001 | 0x0002);
        group.extend(opt(&[(0x0004, 0), (0x0005, 0), (0x0006, 10), (0x0007, 10)]));

        let mut drawing = container(0xF004, &group);
        drawing.extend(container(0xF004, &background));
        let slide = container(1006, &container(1036, &container(0xF002, &drawing)));
        let record = RecordCursor::new(&slide).next().unwrap();
        let pool = PicturePool::default();
        let ctx = SlideContext {
            size: SlideSize::DEFAULT,
            outline_texts: &[],
            pictures: &pool,
        };
        let result = extract_shapes(&record, &ctx);
        assert!(result.shapes.is_empty());
        assert_eq!(result.background, Some(RGBColor::new(0, 255, 0)));
    }

    #[test]
    fn test_unresolved_picture_placeholder() {
        let mut children = sp_atom(75, 0);
        children.extend(opt(&[(0x0104, 4)]));
        let shapes = build(&children, &[]).shapes;
        let image = shapes[0].image().unwrap();
        assert_eq!(image.mime, OCTET_STREAM);
        assert!(!image.is_displayable());
    }

    #[test]
    fn test_bounds_only_shape_kept() {
        let mut children = sp_atom(1, 0);
        children.extend(opt(&[(0x0004, 0), (0x0005, 0), (0x0006, 95250), (0x0007, 95250)]));
        let shapes = build(&children, &[]).shapes;
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].bounds(), BoundingBox::new(0, 0, 10, 10));

        // Neither bounds, text nor picture
        assert!(build(&sp_atom(1, 0), &[]).shapes.is_empty());
        let empty_text = container(0xF00D, &atom(4000, 0, &utf16("  ")));
        let mut children = sp_atom(1, 0);
        children.extend(empty_text);
        assert!(build(&children, &[]).shapes.is_empty());
    }
}
