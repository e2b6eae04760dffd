//! The picture pool of a binary presentation.
//!
//! Collects every picture a file carries: blip records from the `Pictures`
//! stream (addressed through the blip store), blips stored inline in the
//! blip store, and pictures found by signature scanning of all streams.
//! The pool is built once, before slides are assembled, and never changes
//! afterwards; the substitution pass reads it as a snapshot.

use super::Picture;
use super::blip::{BlipStoreEntry, parse_pictures_stream};
use super::signature::scan_pictures;
use crate::presentation::{BoundingBox, Shape, ShapeProps, Slide};
use std::collections::HashSet;

/// Every picture found in one file.
#[derive(Debug, Clone, Default)]
pub struct PicturePool {
    /// Blip store entries in store order (`None` for unreadable entries)
    store: Vec<Option<BlipStoreEntry>>,
    /// Blips of the `Pictures` stream with their offsets
    blips: Vec<(usize, Picture)>,
    /// Displayable pictures, deduplicated, in discovery order
    rasters: Vec<Picture>,
}

impl PicturePool {
    /// Build the pool.
    ///
    /// `streams` are scanned for embedded picture signatures; the `Pictures`
    /// stream is parsed as blip records as well.
    pub fn new<'a>(
        store: Vec<Option<BlipStoreEntry>>,
        pictures_stream: Option<&[u8]>,
        streams: impl IntoIterator<Item = &'a [u8]>,
    ) -> Self {
        let blips = pictures_stream.map(parse_pictures_stream).unwrap_or_default();

        let mut seen = HashSet::new();
        let mut rasters = Vec::new();
        let candidates = store
            .iter()
            .flatten()
            .filter_map(|entry| entry.inline.clone())
            .chain(blips.iter().map(|(_, picture)| picture.clone()))
            .chain(streams.into_iter().flat_map(scan_pictures));
        for picture in candidates {
            if picture.is_displayable() && seen.insert(picture.bytes.clone()) {
                rasters.push(picture);
            }
        }

        log::debug!(
            "Picture pool: {} store entries, {} blips, {} displayable pictures",
            store.len(),
            blips.len(),
            rasters.len()
        );
        Self {
            store,
            blips,
            rasters,
        }
    }

    /// Resolve a 1-based blip reference (`pib`).
    ///
    /// The blip store entry is tried first: its inline blip, then the blip at
    /// its offset in the `Pictures` stream. Without a usable entry the
    /// reference is taken as an ordinal into the `Pictures` stream.
    pub fn resolve(&self, pib: u32) -> Option<&Picture> {
        let index = (pib as usize).checked_sub(1)?;

        if let Some(Some(entry)) = self.store.get(index) {
            if let Some(picture) = entry.inline.as_ref() {
                return Some(picture);
            }
            if let Some((_, picture)) = self
                .blips
                .iter()
                .find(|(offset, _)| *offset == entry.offset as usize)
            {
                return Some(picture);
            }
        }

        self.blips.get(index).map(|(_, picture)| picture)
    }

    /// Displayable pictures in discovery order.
    #[inline]
    pub fn rasters(&self) -> &[Picture] {
        &self.rasters
    }

    /// The displayable picture with the most bytes.
    pub fn largest_raster(&self) -> Option<&Picture> {
        // Earliest wins on ties
        self.rasters
            .iter()
            .rev()
            .max_by_key(|picture| picture.bytes.len())
    }

    /// Replace undisplayable pictures and give picture-less slides a
    /// full-slide background picture.
    ///
    /// Pictures are taken from the pool only; slides are otherwise left as
    /// built. The background picture cycles through the pool by slide index.
    pub fn apply_fallback(&self, slides: &mut [Slide]) {
        let Some(largest) = self.largest_raster() else {
            return;
        };

        for (index, slide) in slides.iter_mut().enumerate() {
            for shape in slide.shapes.iter_mut() {
                if let Shape::Image { image, .. } = shape
                    && !image.is_displayable()
                {
                    log::debug!(
                        "{}: substituting {} picture with the largest raster",
                        slide.path,
                        image.mime
                    );
                    *image = largest.to_image_data();
                }
            }

            if !slide.has_displayable_image() {
                let picture = &self.rasters[index % self.rasters.len()];
                let bounds = BoundingBox::new(0, 0, slide.size.width, slide.size.height);
                slide.shapes.insert(
                    0,
                    Shape::Image {
                        props: ShapeProps::new(bounds),
                        image: picture.to_image_data(),
                    },
                );
            }
        }
    }
}
