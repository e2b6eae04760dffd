//! The `index.apxl` document of Keynote '09 packages.
//!
//! Only two things are read from it: the declared slide size
//! (`key:size/@sfa:w`, `@sfa:h`) and, per `key:slide`, the package path of
//! its thumbnail (`key:thumbnails//sf:data/@sf:path`).

use crate::common::ZipPackage;
use crate::common::xml::{XmlDocument, XmlElement};
use crate::presentation::SlideSize;
use flate2::read::GzDecoder;
use std::io::Read;

const INDEX_NAMES: [&str; 2] = ["index.apxl", "index.apxl.gz"];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// Upper bound on the inflated index document.
const MAX_INDEX_SIZE: u64 = 64 * 1024 * 1024;

/// What the index document says about the slides.
#[derive(Debug, Default, PartialEq)]
pub struct SlideIndex {
    pub size: Option<SlideSize>,
    /// Thumbnail path of each slide, in slide order
    pub thumbnails: Vec<String>,
}

impl SlideIndex {
    /// Read the index document of a package, if it has a readable one.
    pub fn load(package: &ZipPackage) -> Option<Self> {
        let (name, raw) = INDEX_NAMES
            .iter()
            .find_map(|name| package.read_bytes(name).map(|bytes| (*name, bytes)))?;
        let bytes = if raw.starts_with(&GZIP_MAGIC) {
            let mut inflated = Vec::new();
            if let Err(e) = GzDecoder::new(raw.as_slice())
                .take(MAX_INDEX_SIZE)
                .read_to_end(&mut inflated)
            {
                log::warn!("Failed to inflate {}: {}", name, e);
                return None;
            }
            inflated
        } else {
            raw
        };

        let Some(doc) = XmlDocument::parse_bytes(&bytes) else {
            log::warn!("{} is not well-formed XML", name);
            return None;
        };
        Some(Self::from_root(&doc.root))
    }

    fn from_root(root: &XmlElement) -> Self {
        let size = root.first_descendant("size").and_then(|el| {
            let w = dimension(el.attr("sfa:w")?)?;
            let h = dimension(el.attr("sfa:h")?)?;
            Some(SlideSize::new(w, h))
        });
        let thumbnails = root
            .descendants("slide")
            .into_iter()
            .filter_map(|slide| {
                let path = slide
                    .child("thumbnails")?
                    .first_descendant("data")?
                    .attr("sf:path")?;
                Some(path.trim_start_matches("./").to_string())
            })
            .collect();
        Self { size, thumbnails }
    }
}

fn dimension(value: &str) -> Option<i64> {
    let v = fast_float2::parse::<f64, _>(value.trim()).ok()?;
    (v.is_finite() && v > 0.0).then(|| v.round() as i64)
}
