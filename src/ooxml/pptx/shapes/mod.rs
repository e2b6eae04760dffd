/// Shape trees of slides, layouts and masters.
///
/// A `p:spTree` is walked in document order, which is also paint order:
///
/// - `p:sp` becomes a text shape when it carries visible text, otherwise a
///   plain shape when it has a solid fill or a recognised geometry
/// - `p:pic` becomes an image
/// - `p:graphicFrame` becomes a table or a chart
/// - `p:grpSp` is flattened, with its child coordinate space mapped onto the
///   slide
///
/// Connectors and anything else are skipped.
pub mod geometry;
pub mod graphic_frame;
pub mod picture;
pub mod textframe;

pub use geometry::{EmuRect, GroupTransform, Placeholder, PlaceholderBounds};
pub use textframe::parse_text_body;

use crate::common::ZipPackage;
use crate::common::xml::XmlElement;
use crate::ooxml::pptx::color::ColorContext;
use crate::ooxml::pptx::parts::SlidePart;
use crate::presentation::{BoundingBox, DecodeOptions, Fill, Geometry, Shape, ShapeProps, SlideSize};

/// Everything shape conversion needs to know about the part being read.
pub struct ShapeContext<'a, 'p> {
    pub package: &'a ZipPackage<'p>,
    /// Part owning the shape tree; relationships resolve against it
    pub part: &'a SlidePart,
    pub colors: &'a ColorContext,
    pub options: &'a DecodeOptions,
    pub slide_size: SlideSize,
    /// Reading a layout or master rather than the slide itself
    pub is_master: bool,
    /// Placeholder positions to inherit, nearest part first
    pub placeholders: &'a [&'a PlaceholderBounds],
}

impl ShapeContext<'_, '_> {
    /// Pixel bounds of a shape.
    ///
    /// An explicit transform wins. Otherwise a placeholder inherits the
    /// position of its counterpart on the layout or master, and anything
    /// else gets the generic content box.
    pub fn bounds(&self, shape: &XmlElement, transform: &GroupTransform) -> BoundingBox {
        if let Some(rect) = geometry::shape_xfrm(shape).and_then(EmuRect::from_xfrm) {
            return transform.apply(rect).to_box();
        }
        if let Some(ph) = Placeholder::of(shape)
            && let Some(rect) = self.placeholders.iter().find_map(|b| b.find(&ph))
        {
            return rect.to_box();
        }
        self.slide_size.fallback_box()
    }

    pub fn props(&self, shape: &XmlElement, transform: &GroupTransform) -> ShapeProps {
        ShapeProps::new(self.bounds(shape, transform)).with_master(self.is_master)
    }
}

/// Convert every shape of a tree, appending to `out` in paint order.
pub fn collect_shapes(
    tree: &XmlElement,
    ctx: &ShapeContext,
    transform: &GroupTransform,
    out: &mut Vec<Shape>,
) {
    for child in tree.elements() {
        // Placeholders on layouts and masters only hold prompt text
        if ctx.is_master && Placeholder::of(child).is_some() {
            continue;
        }

        match child.local_name() {
            "sp" => out.extend(text_or_shape(child, ctx, transform)),
            "pic" => out.extend(picture::picture_shape(child, ctx, transform)),
            "graphicFrame" => out.extend(graphic_frame::frame_shape(child, ctx, transform)),
            "grpSp" => {
                let inner = transform.compose(&GroupTransform::from_group(child));
                collect_shapes(child, ctx, &inner, out);
            },
            "AlternateContent" => {
                let branch = child
                    .child("Fallback")
                    .or_else(|| child.child("Choice"));
                if let Some(branch) = branch {
                    collect_shapes(branch, ctx, transform, out);
                }
            },
            "cxnSp" => log::debug!("Skipping connector in {}", ctx.part.uri),
            _ => {},
        }
    }
}

/// Convert a `p:sp` element.
fn text_or_shape(sp: &XmlElement, ctx: &ShapeContext, transform: &GroupTransform) -> Option<Shape> {
    let sp_pr = sp.child("spPr");
    let mut props = ctx.props(sp, transform);
    props.fill = ctx.colors.shape_fill(sp_pr, sp.child("style"));
    props.geom = sp_pr
        .and_then(|pr| pr.child("prstGeom"))
        .and_then(|geom| geom.attr("prst"))
        .and_then(Geometry::from_keyword);

    let is_title = Placeholder::of(sp).is_some_and(|ph| ph.is_title());
    let base = textframe::placeholder_defaults(is_title);
    if let Some(body) = sp.child("txBody") {
        let text = parse_text_body(body, &base, ctx.colors);
        if text.has_visible_text() {
            return Some(Shape::Text { props, text });
        }
    }

    if matches!(props.fill, Some(Fill::Solid { .. })) || props.geom.is_some() {
        Some(Shape::Shape { props })
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::common::package::tests::build_zip;
    use crate::ooxml::opc::PackURI;

    pub(crate) const SLIDE_PATH: &str = "ppt/slides/slide1.xml";

    /// Run shape collection over a slide whose tree is `tree_xml`.
    pub(crate) fn shapes_of(tree_xml: &str, extra: &[(&str, &[u8])], is_master: bool) -> Vec<Shape> {
        let slide = format!("<p:sld><p:cSld>{}</p:cSld></p:sld>", tree_xml);
        let mut entries: Vec<(&str, &[u8])> = vec![(SLIDE_PATH, slide.as_bytes())];
        entries.extend_from_slice(extra);
        let bytes = build_zip(&entries);
        let package = ZipPackage::open(&bytes).unwrap();
        let part = SlidePart::load(&package, PackURI::from_member(SLIDE_PATH)).unwrap();
        let colors = ColorContext::default();
        let options = DecodeOptions::default();
        let ctx = ShapeContext {
            package: &package,
            part: &part,
            colors: &colors,
            options: &options,
            slide_size: SlideSize::DEFAULT,
            is_master,
            placeholders: &[],
        };
        let mut out = Vec::new();
        collect_shapes(part.shape_tree().unwrap(), &ctx, &GroupTransform::IDENTITY, &mut out);
        out
    }

    #[test]
    fn test_text_and_plain_shapes() {
        let shapes = shapes_of(
            r#"<p:spTree>
                <p:sp><p:nvSpPr><p:cNvPr id="2"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
                    <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="952500" cy="95250"/></a:xfrm></p:spPr>
                    <p:txBody><a:bodyPr/><a:p><a:r><a:t>Hello</a:t></a:r></a:p></p:txBody></p:sp>
                <p:sp><p:nvSpPr><p:cNvPr id="3"/><p:nvPr/></p:nvSpPr>
                    <p:spPr><a:prstGeom prst="ellipse"/><a:solidFill><a:srgbClr val="00FF00"/></a:solidFill></p:spPr></p:sp>
                <p:sp><p:nvSpPr><p:cNvPr id="4"/><p:nvPr/></p:nvSpPr>
                    <p:spPr><a:prstGeom prst="rect"/></p:spPr><p:txBody><a:p><a:r><a:t>  </a:t></a:r></a:p></p:txBody></p:sp>
                <p:cxnSp/>
            </p:spTree>"#,
            &[],
            false,
        );
        assert_eq!(shapes.len(), 2);

        let text = shapes[0].text_body().unwrap();
        assert_eq!(text.text(), "Hello");
        assert_eq!(text.paragraphs[0].runs[0].style.font_size, Some(44.0));
        assert_eq!(shapes[0].bounds(), BoundingBox::new(0, 0, 100, 10));

        assert_eq!(shapes[1].kind(), "shape");
        assert_eq!(shapes[1].props().geom, Some(Geometry::Ellipse));
        assert_eq!(
            shapes[1].props().fill,
            Some(Fill::Solid {
                color: RGBColor::new(0, 255, 0)
            })
        );
        // No transform and no inherited placeholder
        assert_eq!(shapes[1].bounds(), SlideSize::DEFAULT.fallback_box());
    }

    #[test]
    fn test_groups_and_alternate_content() {
        let shapes = shapes_of(
            r#"<p:spTree>
                <p:grpSp><p:nvGrpSpPr/><p:grpSpPr><a:xfrm>
                    <a:off x="95250" y="95250"/><a:ext cx="190500" cy="190500"/>
                    <a:chOff x="0" y="0"/><a:chExt cx="95250" cy="95250"/></a:xfrm></p:grpSpPr>
                    <p:sp><p:nvSpPr><p:nvPr/></p:nvSpPr><p:spPr>
                        <a:xfrm><a:off x="9525" y="0"/><a:ext cx="9525" cy="9525"/></a:xfrm>
                        <a:prstGeom prst="roundRect"/></p:spPr></p:sp>
                </p:grpSp>
                <mc:AlternateContent>
                    <mc:Choice Requires="p14"><p:sp><p:spPr><a:prstGeom prst="ellipse"/></p:spPr></p:sp></mc:Choice>
                    <mc:Fallback><p:sp><p:spPr><a:prstGeom prst="roundRect"/></p:spPr></p:sp></mc:Fallback>
                </mc:AlternateContent>
            </p:spTree>"#,
            &[],
            false,
        );
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].bounds(), BoundingBox::new(12, 10, 2, 2));
        assert_eq!(shapes[1].props().geom, Some(Geometry::RoundRect));
    }

    #[test]
    fn test_master_placeholders_skipped() {
        let shapes = shapes_of(
            r#"<p:spTree>
                <p:sp><p:nvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>
                    <p:txBody><a:p><a:r><a:t>Click to edit</a:t></a:r></a:p></p:txBody></p:sp>
                <p:sp><p:nvSpPr><p:nvPr/></p:nvSpPr>
                    <p:txBody><a:p><a:r><a:t>Footer art</a:t></a:r></a:p></p:txBody></p:sp>
            </p:spTree>"#,
            &[],
            true,
        );
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].is_master());
        assert_eq!(shapes[0].text_body().unwrap().text(), "Footer art");
    }
}
