//! Media type helpers for embedded pictures.

use phf::phf_map;

/// File extension (lowercase, no dot) to MIME type.
static EXTENSION_MIME: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "jpe" => "image/jpeg",
    "gif" => "image/gif",
    "bmp" => "image/bmp",
    "dib" => "image/bmp",
    "webp" => "image/webp",
    "svg" => "image/svg+xml",
    "tif" => "image/tiff",
    "tiff" => "image/tiff",
    "emf" => "image/x-emf",
    "wmf" => "image/x-wmf",
    "pict" => "image/x-pict",
    "pct" => "image/x-pict",
    "wdp" => "image/vnd.ms-photo",
};

/// MIME types a caller can display without transcoding.
const DISPLAYABLE: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/bmp",
    "image/webp",
    "image/svg+xml",
];

/// Fallback MIME type for unrecognised picture bytes.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Map a file name or path to a MIME type by its extension.
///
/// ```
/// use deckread::common::media::mime_from_path;
/// assert_eq!(mime_from_path("ppt/media/image1.PNG"), Some("image/png"));
/// assert_eq!(mime_from_path("Pictures/x.emf"), Some("image/x-emf"));
/// assert_eq!(mime_from_path("movie.mp4"), None);
/// ```
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    EXTENSION_MIME.get(ext.to_ascii_lowercase().as_str()).copied()
}

/// Whether a MIME type can be shown directly by a browser-like renderer.
///
/// ```
/// use deckread::common::media::is_displayable_mime;
/// assert!(is_displayable_mime("image/jpeg"));
/// assert!(!is_displayable_mime("image/x-emf"));
/// ```
#[inline]
pub fn is_displayable_mime(mime: &str) -> bool {
    DISPLAYABLE.contains(&mime)
}

/// Identify a picture format from its leading bytes.
///
/// ```
/// use deckread::common::media::sniff_mime;
/// assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
/// assert_eq!(sniff_mime(b"GIF89a..."), Some("image/gif"));
/// assert_eq!(sniff_mime(b"nope"), None);
/// ```
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.starts_with(b"BM") && data.len() > 14 {
        Some("image/bmp")
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) {
        Some("image/x-wmf")
    } else if data.len() >= 44 && data[0..4] == [1, 0, 0, 0] && &data[40..44] == b" EMF" {
        Some("image/x-emf")
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        Some("image/tiff")
    } else if looks_like_svg(data) {
        Some("image/svg+xml")
    } else {
        None
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(256)];
    memchr::memmem::find(head, b"<svg").is_some()
}

/// Resolve a MIME type from content first, then from the path.
pub fn resolve_mime(data: &[u8], path: &str) -> &'static str {
    sniff_mime(data)
        .or_else(|| mime_from_path(path))
        .unwrap_or(OCTET_STREAM)
}
