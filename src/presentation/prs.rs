//! Slide deck decoding entry point.

use super::options::DecodeOptions;
use super::slide::Slide;
use super::types::SlideFormat;
use crate::common::{Error, Result};
use serde::Serialize;

/// A format-specific deck parser.
///
/// Each implementation turns the raw bytes of one container format into the
/// canonical slide sequence. Only fatal problems (the container or its
/// mandatory part is unreadable) are returned as errors.
pub trait DeckParser {
    /// Decode `data` into slides in presentation order.
    fn parse(&self, data: &[u8], options: &DecodeOptions) -> Result<Vec<Slide>>;
}

/// A decoded presentation.
///
/// Serializes as a plain array of slides.
///
/// # Examples
///
/// ```rust,no_run
/// use deckread::{DecodeOptions, SlideDeck};
///
/// let bytes = std::fs::read("slides.odp")?;
/// let deck = SlideDeck::decode(&bytes, "slides.odp", &DecodeOptions::default())?;
/// println!("{} slides", deck.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Decode a presentation held in memory.
    ///
    /// The format is chosen from the extension of `file_name`; when that is
    /// not recognised the content is sniffed instead.
    pub fn decode(bytes: &[u8], file_name: &str, options: &DecodeOptions) -> Result<Self> {
        let format = SlideFormat::from_extension(file_name)
            .or_else(|| SlideFormat::detect_from_bytes(bytes))
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("{} is not a recognised presentation", file_name))
            })?;

        log::debug!("Decoding {} as {}", file_name, format);
        Self::decode_as(bytes, format, options)
    }

    /// Decode a presentation whose format is already known.
    pub fn decode_as(bytes: &[u8], format: SlideFormat, options: &DecodeOptions) -> Result<Self> {
        let slides = match format {
            #[cfg(feature = "ole")]
            SlideFormat::Ppt => crate::ole::ppt::PptDeckParser.parse(bytes, options)?,
            #[cfg(feature = "ooxml")]
            SlideFormat::Pptx => crate::ooxml::pptx::PptxDeckParser.parse(bytes, options)?,
            #[cfg(feature = "odf")]
            SlideFormat::Odp => crate::odf::OdpDeckParser.parse(bytes, options)?,
            #[cfg(feature = "iwa")]
            SlideFormat::Keynote => crate::iwa::keynote::KeynoteDeckParser.parse(bytes, options)?,
            #[allow(unreachable_patterns)]
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} support requires the `{}` feature",
                    other,
                    other.feature()
                )));
            },
        };
        Ok(Self { slides })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn into_slides(self) -> Vec<Slide> {
        self.slides
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}
