//! Locating slide thumbnails and previews inside a Keynote package.

use crate::common::ZipPackage;
use crate::common::media::mime_from_path;
use std::io::Cursor;

/// Root-level previews written by recent Keynote versions.
const ROOT_PREVIEWS: [&str; 3] = ["preview.jpg", "preview-web.jpg", "preview-micro.jpg"];

fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

fn is_image_path(path: &str) -> bool {
    mime_from_path(path).is_some_and(|mime| mime.starts_with("image/"))
}

/// Slide thumbnails are named `st<n>.<ext>` (Keynote '09, under `thumbs/`)
/// or `st-<uuid>-<n>.<ext>` (under `Data/`). Master thumbnails (`mt...`)
/// are not slides.
pub fn is_slide_thumbnail(path: &str) -> bool {
    if path.starts_with("QuickLook/") || !is_image_path(path) {
        return false;
    }
    file_name(path)
        .strip_prefix("st")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c == '-' || c.is_ascii_digit())
}

/// The last run of digits in a file name's stem.
///
/// ```
/// use deckread::iwa::keynote::thumbnails::trailing_number;
/// assert_eq!(trailing_number("Data/st-8C1F-12.jpg"), Some(12));
/// assert_eq!(trailing_number("thumbs/st3.tiff"), Some(3));
/// assert_eq!(trailing_number("Data/st-cover.jpg"), None);
/// ```
pub fn trailing_number(path: &str) -> Option<u64> {
    let name = file_name(path);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    atoi_simd::parse::<u64>(stem[stem.len() - digits..].as_bytes()).ok()
}

/// Every slide thumbnail of the package, ordered by trailing number.
///
/// Names without a number sort last, by name.
pub fn slide_thumbnails(package: &ZipPackage) -> Vec<String> {
    let mut names: Vec<&String> = package
        .names()
        .iter()
        .filter(|name| is_slide_thumbnail(name))
        .collect();
    names.sort_by_key(|name| (trailing_number(name).unwrap_or(u64::MAX), name.as_str()));
    names.into_iter().cloned().collect()
}

/// The first preview image: anything under `QuickLook/`, then the
/// root-level previews.
pub fn preview_image(package: &ZipPackage) -> Option<String> {
    package
        .names()
        .iter()
        .find(|name| name.starts_with("QuickLook/") && is_image_path(name))
        .cloned()
        .or_else(|| {
            ROOT_PREVIEWS
                .iter()
                .find(|name| package.has_file(name))
                .map(|name| name.to_string())
        })
}

/// Pixel dimensions of an encoded picture.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok(dims) => Some(dims),
        Err(e) => {
            log::debug!("Cannot read thumbnail dimensions: {}", e);
            None
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::package::tests::build_zip;

    /// A PNG of the given size.
    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image::RgbImage::new(width, height)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_thumbnail_names() {
        assert!(is_slide_thumbnail("Data/st-AB12-3.jpg"));
        assert!(is_slide_thumbnail("thumbs/st0.tiff"));
        assert!(!is_slide_thumbnail("thumbs/mt0.tiff"));
        assert!(!is_slide_thumbnail("Data/style-1.jpg"));
        assert!(!is_slide_thumbnail("Data/st-1.pdf"));
    }

    #[test]
    fn test_numeric_order() {
        let bytes = build_zip(&[
            ("Data/st-x-10.jpg", b"a"),
            ("Data/st-x-2.jpg", b"b"),
            ("Data/st-cover.jpg", b"c"),
            ("Data/mt-x-1.jpg", b"d"),
        ]);
        let package = ZipPackage::open(&bytes).unwrap();
        assert_eq!(
            slide_thumbnails(&package),
            ["Data/st-x-2.jpg", "Data/st-x-10.jpg", "Data/st-cover.jpg"]
        );
    }

    #[test]
    fn test_preview_lookup() {
        let bytes = build_zip(&[("preview.jpg", b"a"), ("QuickLook/Thumbnail.jpg", b"b")]);
        let package = ZipPackage::open(&bytes).unwrap();
        assert_eq!(preview_image(&package).as_deref(), Some("QuickLook/Thumbnail.jpg"));

        let bytes = build_zip(&[("preview-web.jpg", b"a"), ("QuickLook/Preview.pdf", b"b")]);
        let package = ZipPackage::open(&bytes).unwrap();
        assert_eq!(preview_image(&package).as_deref(), Some("preview-web.jpg"));
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(image_dimensions(&png(8, 6)), Some((8, 6)));
        assert_eq!(image_dimensions(b"not an image"), None);
    }
}
