//! Shapes of a drawing page or master page.
//!
//! `draw:frame` elements are classified by their content, in priority
//! order: chart object, image, table, text box. Drawn shapes
//! (`draw:custom-shape`, `draw:rect`, `draw:ellipse`, `draw:circle`) carry
//! their text directly and become text or plain shapes. Groups are
//! flattened; ODF child coordinates are already page coordinates.

use super::chart::chart_from_object;
use super::text::{ActiveList, TextBuilder};
use crate::common::ZipPackage;
use crate::common::media::{is_displayable_mime, resolve_mime};
use crate::common::unit::length_to_px;
use crate::common::xml::XmlElement;
use crate::odf::lists::Numbering;
use crate::odf::styles::{self, Properties, StyleSheet};
use crate::presentation::{
    BoundingBox, DecodeOptions, Fill, Geometry, ImageData, Shape, ShapeProps, SlideSize, TextBody,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Presentation classes that never render on a slide.
const HIDDEN_CLASSES: [&str; 5] = ["page-number", "footer", "header", "date-time", "notes"];

/// State shared by every shape of one page.
pub struct PageContext<'a, 'p> {
    pub package: &'a ZipPackage<'p>,
    pub styles: &'a StyleSheet,
    pub options: &'a DecodeOptions,
    pub size: SlideSize,
    /// Converting a master page
    pub is_master: bool,
}

impl PageContext<'_, '_> {
    /// Convert every shape below `page`, appending in paint order.
    pub fn collect_shapes(&self, page: &XmlElement, numbering: &mut Numbering, out: &mut Vec<Shape>) {
        for el in page.elements() {
            if self.is_hidden(el) {
                continue;
            }
            let shape = match el.local_name() {
                "frame" => self.frame(el, numbering),
                "custom-shape" | "rect" | "ellipse" | "circle" => self.drawn_shape(el, numbering),
                "g" => {
                    self.collect_shapes(el, numbering, out);
                    None
                },
                _ => None,
            };
            out.extend(shape);
        }
    }

    fn is_hidden(&self, el: &XmlElement) -> bool {
        if self.is_master && el.attr("presentation:placeholder") == Some("true") {
            return true;
        }
        el.attr("presentation:class")
            .is_some_and(|class| HIDDEN_CLASSES.contains(&class))
    }

    fn bounds(&self, el: &XmlElement) -> BoundingBox {
        let len = |name: &str| el.attr(name).and_then(length_to_px);
        match (len("svg:width"), len("svg:height")) {
            (Some(cx), Some(cy)) => BoundingBox::from_f64(
                len("svg:x").unwrap_or(0.0),
                len("svg:y").unwrap_or(0.0),
                cx,
                cy,
            ),
            _ => self.size.fallback_box(),
        }
    }

    /// Presentation style, then graphic style, then text style.
    fn shape_properties(&self, el: &XmlElement) -> Properties {
        let mut props = Properties::new();
        for attr in ["presentation:style-name", "draw:style-name", "draw:text-style-name"] {
            if let Some(name) = el.attr(attr) {
                props.extend(
                    self.styles
                        .resolve(name)
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone())),
                );
            }
        }
        props
    }

    fn props(&self, el: &XmlElement, style: &Properties) -> ShapeProps {
        let mut props = ShapeProps::new(self.bounds(el)).with_master(self.is_master);
        props.fill = styles::fill(style);
        props
    }

    fn text_builder<'s>(&'s self, el: &'s XmlElement, style: &'s Properties) -> TextBuilder<'s> {
        let default_list = ["presentation:style-name", "draw:style-name"]
            .iter()
            .filter_map(|attr| el.attr(attr))
            .find_map(|name| self.styles.owned_list_style(name))
            .map(|(name, style)| ActiveList { name, style });
        TextBuilder {
            styles: self.styles,
            frame: style,
            default_list,
            suppress_bullets: el.attr("presentation:class") == Some("title"),
        }
    }

    fn frame(&self, frame: &XmlElement, numbering: &mut Numbering) -> Option<Shape> {
        let style = self.shape_properties(frame);

        for object in frame.elements().filter(|c| matches!(c.local_name(), "object" | "object-ole")) {
            if let Some(href) = object.attr("xlink:href")
                && let Some(data) = chart_from_object(self.package, href)
            {
                return Some(Shape::Chart {
                    props: self.props(frame, &style),
                    data,
                });
            }
        }

        let images: Vec<&XmlElement> = frame.children_named("image").collect();
        if !images.is_empty() {
            return self.image(frame, &images, &style);
        }

        if let Some(table) = frame.child("table") {
            return Some(Shape::Table {
                props: self.props(frame, &style),
                data: table_cells(table),
            });
        }

        let text_box = frame.child("text-box")?;
        let mut props = self.props(frame, &style);
        if text_box
            .attr("draw:corner-radius")
            .and_then(length_to_px)
            .is_some_and(|r| r > 0.0)
        {
            props.geom = Some(Geometry::RoundRect);
        }
        let text = self.text_builder(frame, &style).build(text_box, numbering);
        finish(props, text)
    }

    /// Pick the first displayable alternative of a frame's images.
    fn image(&self, frame: &XmlElement, images: &[&XmlElement], style: &Properties) -> Option<Shape> {
        let loaded: Vec<ImageData> = images.iter().filter_map(|img| self.load_image(img)).collect();
        let chosen = match loaded.iter().position(ImageData::is_displayable) {
            Some(index) => loaded.into_iter().nth(index),
            None if self.options.placeholder_unsupported_media => loaded.into_iter().next(),
            None => {
                if let Some(first) = loaded.first() {
                    log::debug!("Dropping {} picture", first.mime);
                }
                None
            },
        }?;
        Some(Shape::Image {
            props: self.props(frame, style),
            image: chosen,
        })
    }

    fn load_image(&self, image: &XmlElement) -> Option<ImageData> {
        if let Some(data) = image.child("binary-data") {
            let encoded: String = data.text().split_whitespace().collect();
            return match STANDARD.decode(encoded.as_bytes()) {
                Ok(bytes) => {
                    let mime = resolve_mime(&bytes, "");
                    Some(ImageData::new(mime, bytes))
                },
                Err(e) => {
                    log::debug!("Undecodable inline picture: {}", e);
                    None
                },
            };
        }

        let href = image.attr("xlink:href")?;
        if href.contains("://") {
            log::debug!("Skipping linked picture {}", href);
            return None;
        }
        let path = href.trim_start_matches("./");
        let bytes = self.package.read_bytes(path)?;
        let mime = resolve_mime(&bytes, path);
        if !is_displayable_mime(mime) {
            log::debug!("Picture {} is {}", path, mime);
        }
        Some(ImageData::new(mime, bytes))
    }

    fn drawn_shape(&self, el: &XmlElement, numbering: &mut Numbering) -> Option<Shape> {
        let style = self.shape_properties(el);
        let mut props = self.props(el, &style);
        props.geom = match el.local_name() {
            "ellipse" | "circle" => Some(Geometry::Ellipse),
            "rect" => el
                .attr("draw:corner-radius")
                .and_then(length_to_px)
                .filter(|r| *r > 0.0)
                .map(|_| Geometry::RoundRect),
            _ => el
                .child("enhanced-geometry")
                .and_then(|geom| geom.attr("draw:type"))
                .and_then(Geometry::from_keyword),
        };
        let text = self.text_builder(el, &style).build(el, numbering);
        finish(props, text)
    }
}

/// A text shape when there is visible text, else a plain shape when there
/// is something to paint.
fn finish(props: ShapeProps, text: TextBody) -> Option<Shape> {
    if text.has_visible_text() {
        return Some(Shape::Text { props, text });
    }
    if matches!(props.fill, Some(Fill::Solid { .. })) || props.geom.is_some() {
        Some(Shape::Shape { props })
    } else {
        None
    }
}

/// Cell texts of a `table:table`, one line per paragraph, padded to a
/// rectangle.
fn table_cells(table: &XmlElement) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = table
        .descendants("table-row")
        .into_iter()
        .map(|row| {
            row.elements()
                .filter(|c| matches!(c.local_name(), "table-cell" | "covered-table-cell"))
                .map(|cell| {
                    cell.children_named("p")
                        .map(XmlElement::text)
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect()
        })
        .collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::common::package::tests::build_zip;
    use crate::common::xml::XmlDocument;

    const STYLES: &str = r##"<office:document-content><office:automatic-styles>
        <style:style style:name="gr1" style:family="graphic">
            <style:graphic-properties draw:fill="solid" draw:fill-color="#ff0000" draw:textarea-vertical-align="middle"/>
        </style:style>
        <style:style style:name="pr1" style:family="presentation">
            <style:graphic-properties>
                <text:list-style style:name="pr1">
                    <text:list-level-style-bullet text:level="1" text:bullet-char="•"/>
                </text:list-style>
            </style:graphic-properties>
        </style:style>
    </office:automatic-styles></office:document-content>"##;

    fn convert(page_xml: &str, entries: &[(&str, &[u8])], is_master: bool, options: DecodeOptions) -> Vec<Shape> {
        let bytes = build_zip(entries);
        let package = ZipPackage::open(&bytes).unwrap();
        let mut styles = StyleSheet::new();
        styles.load(&XmlDocument::parse(STYLES).unwrap().root);
        let ctx = PageContext {
            package: &package,
            styles: &styles,
            options: &options,
            size: SlideSize::DEFAULT,
            is_master,
        };
        let page = XmlDocument::parse(page_xml).unwrap();
        let mut out = Vec::new();
        ctx.collect_shapes(&page.root, &mut Numbering::new(), &mut out);
        out
    }

    #[test]
    fn test_text_frames_and_hidden_classes() {
        let shapes = convert(
            r#"<draw:page>
                <draw:frame presentation:class="outline" presentation:style-name="pr1"
                    svg:x="1in" svg:y="0.5in" svg:width="2in" svg:height="1in">
                    <draw:text-box><text:list><text:list-item><text:p>Point</text:p></text:list-item></text:list></draw:text-box>
                </draw:frame>
                <draw:frame presentation:class="title" presentation:style-name="pr1" svg:width="1in" svg:height="1in">
                    <draw:text-box><text:list><text:list-item><text:p>Heading</text:p></text:list-item></text:list></draw:text-box>
                </draw:frame>
                <draw:frame presentation:class="page-number"><draw:text-box><text:p>3</text:p></draw:text-box></draw:frame>
                <draw:g><draw:custom-shape draw:style-name="gr1" svg:width="1cm" svg:height="1cm">
                    <draw:enhanced-geometry draw:type="ellipse"/>
                </draw:custom-shape></draw:g>
            </draw:page>"#,
            &[("mimetype", b"application/vnd.oasis.opendocument.presentation")],
            false,
            DecodeOptions::default(),
        );
        assert_eq!(shapes.len(), 3);

        assert_eq!(shapes[0].bounds(), BoundingBox::new(96, 48, 192, 96));
        let body = shapes[0].text_body().unwrap();
        assert_eq!(body.paragraphs[0].bullet, Some(crate::presentation::Bullet::Char { char: "•".into() }));

        let title = shapes[1].text_body().unwrap();
        assert_eq!(title.paragraphs[0].bullet, None);

        assert_eq!(shapes[2].props().geom, Some(Geometry::Ellipse));
        assert_eq!(
            shapes[2].props().fill,
            Some(Fill::Solid {
                color: RGBColor::new(255, 0, 0)
            })
        );
    }

    #[test]
    fn test_master_placeholders_skipped() {
        let shapes = convert(
            r#"<style:master-page>
                <draw:frame presentation:class="title" presentation:placeholder="true" svg:width="1in" svg:height="1in"/>
                <draw:rect draw:style-name="gr1" svg:width="1in" svg:height="1in"/>
            </style:master-page>"#,
            &[("mimetype", b"x")],
            true,
            DecodeOptions::default(),
        );
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].is_master());
    }

    #[test]
    fn test_images() {
        let png: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let page = r#"<draw:page>
            <draw:frame svg:width="1in" svg:height="1in"><draw:image xlink:href="Pictures/a.svm"/><draw:image xlink:href="Pictures/b.png"/></draw:frame>
            <draw:frame svg:width="1in" svg:height="1in"><draw:image><office:binary-data>iVBORw0K
                GgoAAAANSUhEUg==</office:binary-data></draw:image></draw:frame>
            <draw:frame svg:width="1in" svg:height="1in"><draw:image xlink:href="Pictures/a.svm"/></draw:frame>
        </draw:page>"#;
        let entries: [(&str, &[u8]); 2] = [("Pictures/a.svm", b"VCLMTF"), ("Pictures/b.png", png)];

        let shapes = convert(page, &entries, false, DecodeOptions::default());
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].image().unwrap().bytes, png);
        assert_eq!(shapes[1].image().unwrap().mime, "image/png");

        let options = DecodeOptions::default().with_placeholder_unsupported_media(true);
        let shapes = convert(page, &entries, false, options);
        assert_eq!(shapes.len(), 3);
        assert!(!shapes[2].image().unwrap().is_displayable());
    }

    #[test]
    fn test_table_frame() {
        let shapes = convert(
            r#"<draw:page><draw:frame svg:width="1in" svg:height="1in"><table:table>
                <table:table-row><table:table-cell><text:p>a</text:p><text:p>b</text:p></table:table-cell></table:table-row>
                <table:table-row><table:table-cell><text:p>c</text:p></table:table-cell><table:table-cell/></table:table-row>
            </table:table></draw:frame></draw:page>"#,
            &[("mimetype", b"x")],
            false,
            DecodeOptions::default(),
        );
        let Shape::Table { data, .. } = &shapes[0] else {
            panic!("expected a table, got {:?}", shapes);
        };
        assert_eq!(data, &[vec!["a\nb", ""], vec!["c", ""]]);
    }
}
