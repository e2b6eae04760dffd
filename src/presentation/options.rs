//! Decoding options.

/// Options controlling how a deck is decoded.
///
/// # Examples
///
/// ```rust
/// use deckread::DecodeOptions;
///
/// let options = DecodeOptions::new()
///     .with_max_slides(5)
///     .with_picture_fallback(false);
/// assert_eq!(options.max_slides, Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Upper bound on decoded slides. When `None`, the OOXML parser stops at
    /// 20 slides and the other parsers are unbounded.
    pub max_slides: Option<usize>,
    /// Substitute the largest raster picture for undisplayable pictures in
    /// binary files, and give picture-less slides a background picture.
    pub picture_fallback: bool,
    /// Keep pictures in undisplayable formats (EMF, WMF, TIFF...) from XML
    /// packages as image shapes instead of dropping them.
    pub placeholder_unsupported_media: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_slides: None,
            picture_fallback: true,
            placeholder_unsupported_media: false,
        }
    }
}

impl DecodeOptions {
    /// Create a new `DecodeOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of decoded slides.
    #[inline]
    pub fn with_max_slides(mut self, max: usize) -> Self {
        self.max_slides = Some(max);
        self
    }

    /// Enable or disable the binary parser's picture substitution.
    #[inline]
    pub fn with_picture_fallback(mut self, enabled: bool) -> Self {
        self.picture_fallback = enabled;
        self
    }

    /// Keep undisplayable pictures from XML packages.
    #[inline]
    pub fn with_placeholder_unsupported_media(mut self, enabled: bool) -> Self {
        self.placeholder_unsupported_media = enabled;
        self
    }

    /// Effective slide limit given a format's own default.
    #[inline]
    pub(crate) fn slide_limit(&self, format_default: Option<usize>) -> usize {
        self.max_slides.or(format_default).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_limit() {
        let options = DecodeOptions::default();
        assert_eq!(options.slide_limit(Some(20)), 20);
        assert_eq!(options.slide_limit(None), usize::MAX);
        assert_eq!(options.clone().with_max_slides(3).slide_limit(Some(20)), 3);
    }
}
