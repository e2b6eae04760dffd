/// Slide, layout and master parts.
///
/// The three kinds of part share one layout (`p:cSld` holding `p:bg` and
/// `p:spTree`), so one type covers them all. A slide is read together with
/// the layout and master it inherits from; any missing link in that chain
/// simply leaves the inherited side empty.
use crate::common::{RGBColor, ZipPackage};
use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::opc::{PackURI, Relationships};
use crate::ooxml::pptx::color::ColorContext;
use crate::ooxml::pptx::parts::Theme;

/// Load the relationships of a part; a missing `.rels` part means none.
pub fn load_rels(package: &ZipPackage, part: &PackURI) -> Relationships {
    let rels_uri = part.rels_uri();
    match package.read_text(rels_uri.membername()) {
        Some(xml) => Relationships::parse(&xml, part),
        None => Relationships::default(),
    }
}

/// A parsed slide, layout or master part with its relationships.
#[derive(Debug)]
pub struct SlidePart {
    pub uri: PackURI,
    pub doc: XmlDocument,
    pub rels: Relationships,
}

impl SlidePart {
    /// Read and parse a part. Returns `None` when it is missing or not
    /// well-formed.
    pub fn load(package: &ZipPackage, uri: PackURI) -> Option<Self> {
        let doc = package.read_xml(uri.membername())?;
        let rels = load_rels(package, &uri);
        Some(Self { uri, doc, rels })
    }

    /// Follow the first relationship of `reltype` to another slide-like part.
    pub fn related(&self, package: &ZipPackage, reltype: &str) -> Option<SlidePart> {
        let target = self.rels.target_of_type(reltype);
        if target.is_none() {
            log::debug!("{} has no relationship of type {}", self.uri, reltype);
        }
        SlidePart::load(package, target?)
    }

    /// `p:cSld`
    #[inline]
    pub fn common_slide_data(&self) -> Option<&XmlElement> {
        self.doc.root.child("cSld")
    }

    /// `p:cSld/p:spTree`
    pub fn shape_tree(&self) -> Option<&XmlElement> {
        self.common_slide_data()?.child("spTree")
    }

    /// `p:cSld/p:bg`
    pub fn background(&self) -> Option<&XmlElement> {
        self.common_slide_data()?.child("bg")
    }
}

/// A slide together with the parts it inherits from.
#[derive(Debug)]
pub struct SlideChain {
    pub slide: SlidePart,
    pub layout: Option<SlidePart>,
    pub master: Option<SlidePart>,
    pub colors: ColorContext,
}

impl SlideChain {
    /// Resolve slide -> layout -> master -> theme.
    pub fn load(package: &ZipPackage, slide: SlidePart) -> Self {
        let layout = slide.related(package, RT::SLIDE_LAYOUT);
        let master = layout
            .as_ref()
            .and_then(|layout| layout.related(package, RT::SLIDE_MASTER));

        let theme = master
            .as_ref()
            .and_then(|master| master.rels.target_of_type(RT::THEME))
            .and_then(|uri| package.read_text(uri.membername()))
            .map(|xml| Theme::parse(&xml))
            .unwrap_or_default();
        let clr_map = master.as_ref().and_then(|m| m.doc.root.child("clrMap"));
        let colors = ColorContext::new(theme, clr_map);

        Self {
            slide,
            layout,
            master,
            colors,
        }
    }

    /// Background colour, looked up slide first, then layout, then master.
    pub fn background(&self) -> Option<RGBColor> {
        std::iter::once(&self.slide)
            .chain(self.layout.iter())
            .chain(self.master.iter())
            .find_map(|part| part.background())
            .and_then(|bg| self.colors.background(bg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::package::tests::build_zip;

    const SLIDE: &str = r#"<p:sld><p:cSld><p:spTree/></p:cSld></p:sld>"#;
    const SLIDE_RELS: &str = r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#;
    const LAYOUT: &str = r#"<p:sldLayout><p:cSld><p:spTree/></p:cSld></p:sldLayout>"#;
    const LAYOUT_RELS: &str = r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;
    const MASTER: &str = r#"<p:sldMaster><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree/></p:cSld><p:clrMap bg1="lt1" tx1="dk1"/></p:sldMaster>"#;
    const MASTER_RELS: &str = r#"<Relationships><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;
    const THEME: &str = r#"<a:theme><a:clrScheme><a:lt1><a:srgbClr val="FAFAFA"/></a:lt1></a:clrScheme></a:theme>"#;

    #[test]
    fn test_chain_and_inherited_background() {
        let bytes = build_zip(&[
            ("ppt/slides/slide1.xml", SLIDE.as_bytes()),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE_RELS.as_bytes()),
            ("ppt/slideLayouts/slideLayout1.xml", LAYOUT.as_bytes()),
            ("ppt/slideLayouts/_rels/slideLayout1.xml.rels", LAYOUT_RELS.as_bytes()),
            ("ppt/slideMasters/slideMaster1.xml", MASTER.as_bytes()),
            ("ppt/slideMasters/_rels/slideMaster1.xml.rels", MASTER_RELS.as_bytes()),
            ("ppt/theme/theme1.xml", THEME.as_bytes()),
        ]);
        let package = ZipPackage::open(&bytes).unwrap();
        let slide = SlidePart::load(&package, PackURI::from_member("ppt/slides/slide1.xml")).unwrap();
        let chain = SlideChain::load(&package, slide);

        assert!(chain.layout.is_some());
        assert!(chain.master.is_some());
        assert_eq!(chain.background(), Some(RGBColor::new(0xFA, 0xFA, 0xFA)));
    }

    #[test]
    fn test_missing_layout_is_tolerated() {
        let bytes = build_zip(&[
            ("ppt/slides/slide1.xml", SLIDE.as_bytes()),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE_RELS.as_bytes()),
        ]);
        let package = ZipPackage::open(&bytes).unwrap();
        let slide = SlidePart::load(&package, PackURI::from_member("ppt/slides/slide1.xml")).unwrap();
        let chain = SlideChain::load(&package, slide);
        assert!(chain.layout.is_none());
        assert!(chain.master.is_none());
        assert_eq!(chain.background(), None);
    }
}
