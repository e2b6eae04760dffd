/// Conversion of one slide and the parts it inherits from.
use crate::common::ZipPackage;
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::parts::{SlideChain, SlidePart};
use crate::ooxml::pptx::shapes::{GroupTransform, PlaceholderBounds, ShapeContext, collect_shapes};
use crate::presentation::{DecodeOptions, Slide, SlideSize};

/// Decode the slide stored at `uri`.
///
/// Master shapes are painted first, then layout shapes, then the slide's
/// own. A slide part that is missing or malformed decodes to an empty slide
/// so later slides keep their positions.
pub fn decode_slide(
    package: &ZipPackage,
    uri: PackURI,
    size: SlideSize,
    options: &DecodeOptions,
) -> Slide {
    let mut slide = Slide::new(uri.membername(), size);
    let Some(part) = SlidePart::load(package, uri) else {
        log::warn!("Slide {} could not be read", slide.path);
        return slide;
    };
    let chain = SlideChain::load(package, part);

    let bounds_of = |part: Option<&SlidePart>| {
        part.and_then(SlidePart::shape_tree)
            .map(PlaceholderBounds::from_tree)
            .unwrap_or_default()
    };
    let layout_bounds = bounds_of(chain.layout.as_ref());
    let master_bounds = bounds_of(chain.master.as_ref());

    let layers: [(Option<&SlidePart>, bool, Vec<&PlaceholderBounds>); 3] = [
        (chain.master.as_ref(), true, Vec::new()),
        (chain.layout.as_ref(), true, vec![&master_bounds]),
        (Some(&chain.slide), false, vec![&layout_bounds, &master_bounds]),
    ];

    for (part, is_master, placeholders) in layers {
        let Some(part) = part else { continue };
        let Some(tree) = part.shape_tree() else {
            log::debug!("{} has no shape tree", part.uri);
            continue;
        };
        let ctx = ShapeContext {
            package,
            part,
            colors: &chain.colors,
            options,
            slide_size: size,
            is_master,
            placeholders: &placeholders,
        };
        collect_shapes(tree, &ctx, &GroupTransform::IDENTITY, &mut slide.shapes);
    }

    slide.background = chain.background();
    slide
}
