//! Presentation format identification.

use crate::common::detection;
use std::fmt;

/// A supported presentation container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideFormat {
    /// Legacy binary PowerPoint (OLE2)
    Ppt,
    /// Office Open XML presentation
    Pptx,
    /// OpenDocument presentation
    Odp,
    /// Apple Keynote package
    Keynote,
}

impl SlideFormat {
    /// Identify a format from a file name or bare extension.
    ///
    /// ```
    /// use deckread::SlideFormat;
    /// assert_eq!(SlideFormat::from_extension("Talk.PPTX"), Some(SlideFormat::Pptx));
    /// assert_eq!(SlideFormat::from_extension("pps"), Some(SlideFormat::Ppt));
    /// assert_eq!(SlideFormat::from_extension("notes.txt"), None);
    /// ```
    pub fn from_extension(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map_or(name, |(_, ext)| ext);
        match ext.to_ascii_lowercase().as_str() {
            "ppt" | "pps" | "pot" => Some(Self::Ppt),
            "pptx" | "pptm" | "ppsx" | "ppsm" | "potx" | "potm" => Some(Self::Pptx),
            "odp" | "otp" => Some(Self::Odp),
            "key" => Some(Self::Keynote),
            _ => None,
        }
    }

    /// Identify a format from the file content.
    #[inline]
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        detection::detect_slide_format_from_bytes(bytes)
    }

    /// Name of the cargo feature that enables this format.
    pub fn feature(&self) -> &'static str {
        match self {
            Self::Ppt => "ole",
            Self::Pptx => "ooxml",
            Self::Odp => "odf",
            Self::Keynote => "iwa",
        }
    }
}

impl fmt::Display for SlideFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ppt => "PPT",
            Self::Pptx => "PPTX",
            Self::Odp => "ODP",
            Self::Keynote => "Keynote",
        })
    }
}
