// Picture handling for binary presentations
//
// Pictures reach a slide either through a blip reference on a shape or,
// as a fallback, through signature scanning of the raw streams.
//
// # Architecture
//
// - `blip`: BLIP record and blip store entry parsing
// - `signature`: structural scanning for embedded JPEG/PNG/GIF/EMF files
// - `pool`: the per-file picture pool and the substitution post-pass
//
// Metafiles are never rasterised; they surface as undisplayable pictures
// for the caller (or the substitution pass) to deal with.

pub mod blip;
pub mod pool;
pub mod signature;

pub use blip::{BlipStoreEntry, BlipType};
pub use pool::PicturePool;
pub use signature::scan_pictures;

use crate::common::media::is_displayable_mime;
use crate::presentation::ImageData;

/// Decoded picture bytes with their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Picture {
    pub fn new(mime: &'static str, bytes: Vec<u8>) -> Self {
        Self { mime, bytes }
    }

    #[inline]
    pub fn is_displayable(&self) -> bool {
        is_displayable_mime(self.mime)
    }

    /// Copy into the model's image payload.
    pub fn to_image_data(&self) -> ImageData {
        ImageData::new(self.mime, self.bytes.clone())
    }
}
