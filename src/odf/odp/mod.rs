//! OpenDocument Presentation (.odp) decoding.
//!
//! Every `draw:page` of `content.xml` becomes one slide. Shapes of the
//! page's master (`style:master-page` in `styles.xml`) are painted first and
//! flagged as master shapes; placeholders defined on the master are not
//! drawn since the page carries its own copy.
//!
//! # Example
//!
//! ```rust,no_run
//! use deckread::{DeckParser, DecodeOptions};
//! use deckread::odf::OdpDeckParser;
//!
//! let bytes = std::fs::read("talk.odp")?;
//! for slide in OdpDeckParser.parse(&bytes, &DecodeOptions::default())? {
//!     println!("{}: {}", slide.path, slide.text());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chart;
mod frame;
mod parser;
mod text;

use crate::common::{Result, ZipPackage};
use crate::presentation::{DeckParser, DecodeOptions, Slide};
use parser::OdpDocument;

/// Decoder for ODF presentations.
#[derive(Debug, Clone, Copy, Default)]
pub struct OdpDeckParser;

impl DeckParser for OdpDeckParser {
    /// An archive without a readable `content.xml` decodes to no slides.
    fn parse(&self, data: &[u8], options: &DecodeOptions) -> Result<Vec<Slide>> {
        let package = ZipPackage::open(data)?;
        let Some(content) = package.read_xml("content.xml") else {
            log::warn!("ODF package has no readable content.xml");
            return Ok(Vec::new());
        };

        let slides = OdpDocument::new(package, content).slides(options);
        log::debug!("Decoded {} slides from ODF presentation", slides.len());
        Ok(slides)
    }
}
