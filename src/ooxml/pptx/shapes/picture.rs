/// Picture (`p:pic`) shapes.
///
/// The picture bytes are found through the `r:embed` attribute of
/// `p:blipFill/a:blip`, resolved against the owning part's relationships.
/// Linked pictures (`r:link`) live outside the package and are skipped.
use super::{GroupTransform, ShapeContext};
use crate::common::media::{is_displayable_mime, resolve_mime};
use crate::common::xml::XmlElement;
use crate::presentation::{ImageData, Shape};

/// Relationship id of the embedded picture.
pub fn embed_rid(pic: &XmlElement) -> Option<&str> {
    pic.child("blipFill")?.child("blip")?.attr("r:embed")
}

/// Convert a `p:pic` element.
///
/// Pictures a renderer cannot show are dropped unless the options ask to
/// keep them as placeholders.
pub fn picture_shape(pic: &XmlElement, ctx: &ShapeContext, transform: &GroupTransform) -> Option<Shape> {
    let Some(r_id) = embed_rid(pic) else {
        log::debug!("Picture in {} has no embedded image", ctx.part.uri);
        return None;
    };
    let target = ctx.part.rels.target_of(r_id)?;
    let bytes = ctx.package.read_bytes(target.membername())?;
    let mime = resolve_mime(&bytes, target.membername());

    if !is_displayable_mime(mime) && !ctx.options.placeholder_unsupported_media {
        log::debug!("Dropping {} picture {}", mime, target);
        return None;
    }

    Some(Shape::Image {
        props: ctx.props(pic, transform),
        image: ImageData::new(mime, bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::shapes_of;
    use crate::presentation::BoundingBox;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const EMF: &[u8] = &[
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b' ', b'E', b'M', b'F',
    ];
    const RELS: &str = r#"<Relationships>
        <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
        <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image2.emf"/>
    </Relationships>"#;

    fn tree(r_id: &str) -> String {
        format!(
            r#"<p:spTree><p:pic><p:nvPicPr><p:cNvPr id="5"/><p:nvPr/></p:nvPicPr>
                <p:blipFill><a:blip r:embed="{}"/></p:blipFill>
                <p:spPr><a:xfrm><a:off x="95250" y="0"/><a:ext cx="95250" cy="95250"/></a:xfrm></p:spPr>
            </p:pic></p:spTree>"#,
            r_id
        )
    }

    fn media() -> Vec<(&'static str, &'static [u8])> {
        vec![
            ("ppt/slides/_rels/slide1.xml.rels", RELS.as_bytes()),
            ("ppt/media/image1.png", PNG),
            ("ppt/media/image2.emf", EMF),
        ]
    }

    #[test]
    fn test_embedded_picture() {
        let shapes = shapes_of(&tree("rId2"), &media(), false);
        assert_eq!(shapes.len(), 1);
        let image = shapes[0].image().unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, PNG);
        assert_eq!(shapes[0].bounds(), BoundingBox::new(10, 0, 10, 10));
    }

    #[test]
    fn test_unsupported_and_missing_pictures_dropped() {
        assert!(shapes_of(&tree("rId3"), &media(), false).is_empty());
        assert!(shapes_of(&tree("rId9"), &media(), false).is_empty());
    }
}
