/// Package-level entry point for PowerPoint (.pptx) presentations.
use crate::common::unit::emu_to_px;
use crate::common::{Result, ZipPackage};
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::parts::{PresentationInfo, load_rels};
use crate::ooxml::pptx::slide::decode_slide;
use crate::presentation::{DeckParser, DecodeOptions, Slide, SlideSize};

/// Slides decoded when the caller sets no limit.
pub const DEFAULT_SLIDE_LIMIT: usize = 20;

const DEFAULT_PRESENTATION_PART: &str = "/ppt/presentation.xml";

/// Decoder for OOXML presentations.
///
/// # Examples
///
/// ```rust,no_run
/// use deckread::{DeckParser, DecodeOptions};
/// use deckread::ooxml::pptx::PptxDeckParser;
///
/// let bytes = std::fs::read("presentation.pptx")?;
/// let slides = PptxDeckParser.parse(&bytes, &DecodeOptions::default())?;
/// for slide in &slides {
///     println!("{}: {} shapes", slide.path, slide.shapes.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxDeckParser;

impl DeckParser for PptxDeckParser {
    /// Only an unreadable archive is fatal; a package without a
    /// presentation part or slides decodes to no slides.
    fn parse(&self, data: &[u8], options: &DecodeOptions) -> Result<Vec<Slide>> {
        let package = ZipPackage::open(data)?;

        let presentation_uri = presentation_part(&package);
        let info = package
            .read_text(presentation_uri.membername())
            .map(|xml| PresentationInfo::parse(&xml))
            .unwrap_or_default();
        let size = info
            .slide_size_emu
            .map(|(cx, cy)| SlideSize::new(emu_to_px(cx), emu_to_px(cy)))
            .unwrap_or_default();

        let limit = options.slide_limit(Some(DEFAULT_SLIDE_LIMIT));
        let slides: Vec<Slide> = slide_order(&package, &presentation_uri, &info)
            .into_iter()
            .take(limit)
            .map(|uri| decode_slide(&package, uri, size, options))
            .collect();

        log::debug!("Decoded {} slides from OOXML presentation", slides.len());
        Ok(slides)
    }
}

/// The main presentation part, as named by the package relationships.
fn presentation_part(package: &ZipPackage) -> PackURI {
    let root_rels = load_rels(package, &PackURI::from_member(""));
    root_rels
        .target_of_type(RT::OFFICE_DOCUMENT)
        .filter(|uri| package.has_file(uri.membername()))
        .unwrap_or_else(|| PackURI::from_member(DEFAULT_PRESENTATION_PART))
}

/// Slide parts in presentation order.
///
/// The slide id list is resolved through the presentation's relationships.
/// When none of it resolves to an existing part, every `slideN.xml` under
/// `ppt/slides/` is taken in lexicographic order.
fn slide_order(package: &ZipPackage, presentation: &PackURI, info: &PresentationInfo) -> Vec<PackURI> {
    let rels = load_rels(package, presentation);
    let ordered: Vec<PackURI> = info
        .slide_rids
        .iter()
        .filter_map(|r_id| {
            let uri = rels.target_of(r_id);
            if uri.is_none() {
                log::debug!("Slide relationship {} does not resolve", r_id);
            }
            uri
        })
        .filter(|uri| package.has_file(uri.membername()))
        .collect();
    if !ordered.is_empty() {
        return ordered;
    }

    let mut names: Vec<&String> = package
        .names()
        .iter()
        .filter(|name| {
            name.strip_prefix("ppt/slides/slide")
                .is_some_and(|rest| rest.ends_with(".xml") && !rest.contains('/'))
        })
        .collect();
    names.sort();
    if !names.is_empty() {
        log::debug!("Slide list unresolved; using {} slide parts by name", names.len());
    }
    names.into_iter().map(|name| PackURI::from_member(name)).collect()
}
