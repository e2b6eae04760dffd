//! Presentation format detection.
//!
//! Detection is based on file signatures (magic numbers) and, for ZIP
//! packages, on the well-known entries each format stores. It is only used
//! when the file name carries no recognised extension.

use crate::presentation::SlideFormat;

// Magic number signatures
pub const OLE2_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

const ODP_MIMETYPES: [&str; 2] = [
    "application/vnd.oasis.opendocument.presentation",
    "application/vnd.oasis.opendocument.presentation-template",
];

/// Detect the presentation format of a buffer from its content.
///
/// ```
/// use deckread::common::detect_slide_format_from_bytes;
/// use deckread::SlideFormat;
///
/// let mut ole = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// ole.resize(512, 0);
/// assert_eq!(detect_slide_format_from_bytes(&ole), Some(SlideFormat::Ppt));
/// assert_eq!(detect_slide_format_from_bytes(b"hello"), None);
/// ```
pub fn detect_slide_format_from_bytes(bytes: &[u8]) -> Option<SlideFormat> {
    if bytes.starts_with(OLE2_SIGNATURE) {
        return Some(SlideFormat::Ppt);
    }
    if bytes.starts_with(ZIP_SIGNATURE) {
        return detect_zip_format(bytes);
    }
    None
}

#[cfg(any(feature = "ooxml", feature = "odf", feature = "iwa"))]
fn detect_zip_format(bytes: &[u8]) -> Option<SlideFormat> {
    let package = crate::common::ZipPackage::open(bytes).ok()?;

    if package.has_file("ppt/presentation.xml") {
        return Some(SlideFormat::Pptx);
    }

    if let Some(mimetype) = package.read_text("mimetype")
        && ODP_MIMETYPES.contains(&mimetype.trim())
    {
        return Some(SlideFormat::Odp);
    }

    let is_keynote = package.names().iter().any(|name| {
        name == "index.apxl"
            || name == "index.apxl.gz"
            || name.starts_with("Index/")
            || name.starts_with("QuickLook/")
    });
    if is_keynote {
        return Some(SlideFormat::Keynote);
    }

    None
}

#[cfg(not(any(feature = "ooxml", feature = "odf", feature = "iwa")))]
fn detect_zip_format(_bytes: &[u8]) -> Option<SlideFormat> {
    None
}
