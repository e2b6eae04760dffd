//! Keynote (.key) decoding from embedded thumbnails.
//!
//! The Keynote document model itself is not decoded. Each slide becomes a
//! single picture covering the whole slide, taken from the first source
//! that yields anything:
//!
//! 1. the `index.apxl` document of Keynote '09 packages, which lists every
//!    slide's thumbnail and the slide size;
//! 2. slide thumbnails found by name (`st-...-<n>.jpg`), ordered by their
//!    trailing number;
//! 3. a single QuickLook preview, as a one-slide deck.

pub mod index;
pub mod thumbnails;

use crate::common::media::resolve_mime;
use crate::common::{Result, ZipPackage};
use crate::presentation::{BoundingBox, DeckParser, DecodeOptions, ImageData, Shape, ShapeProps, Slide, SlideSize};
use index::SlideIndex;

/// Decoder for Keynote packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeynoteDeckParser;

impl DeckParser for KeynoteDeckParser {
    fn parse(&self, data: &[u8], options: &DecodeOptions) -> Result<Vec<Slide>> {
        let package = ZipPackage::open(data)?;
        let limit = options.slide_limit(None);

        if let Some(index) = SlideIndex::load(&package) {
            let slides = build_slides(&package, &index.thumbnails, index.size, limit);
            if !slides.is_empty() {
                log::debug!("Decoded {} Keynote slides from the index document", slides.len());
                return Ok(slides);
            }
        }

        let slides = build_slides(&package, &thumbnails::slide_thumbnails(&package), None, limit);
        if !slides.is_empty() {
            log::debug!("Decoded {} Keynote slides from thumbnails", slides.len());
            return Ok(slides);
        }

        let preview: Vec<String> = thumbnails::preview_image(&package).into_iter().collect();
        let slides = build_slides(&package, &preview, None, limit);
        if slides.is_empty() {
            log::warn!("Keynote package has no thumbnails or previews");
        }
        Ok(slides)
    }
}

/// One full-bleed picture slide per readable thumbnail.
///
/// Without a declared size, every slide takes the pixel size of the first
/// readable thumbnail.
fn build_slides(package: &ZipPackage, paths: &[String], declared: Option<SlideSize>, limit: usize) -> Vec<Slide> {
    let pictures: Vec<(&String, Vec<u8>)> = paths
        .iter()
        .filter_map(|path| {
            let bytes = package.read_bytes(path);
            if bytes.is_none() {
                log::debug!("Thumbnail {} is missing", path);
            }
            bytes.map(|bytes| (path, bytes))
        })
        .take(limit)
        .collect();

    let size = declared
        .or_else(|| {
            let (w, h) = thumbnails::image_dimensions(&pictures.first()?.1)?;
            (w > 0 && h > 0).then(|| SlideSize::new(i64::from(w), i64::from(h)))
        })
        .unwrap_or_default();

    pictures
        .into_iter()
        .map(|(path, bytes)| {
            let mut slide = Slide::new(path.as_str(), size);
            let mime = resolve_mime(&bytes, path);
            slide.shapes.push(Shape::Image {
                props: ShapeProps::new(BoundingBox::new(0, 0, size.width, size.height)),
                image: ImageData::new(mime, bytes),
            });
            slide
        })
        .collect()
}
