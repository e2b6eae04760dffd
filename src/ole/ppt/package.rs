//! Deck parser for legacy PowerPoint presentations (.ppt).
//!
//! A .ppt file is an OLE2 compound file. The decoder needs:
//! - **PowerPoint Document**: the record stream holding slides (mandatory)
//! - **Current User**: pointer to the latest edit (optional, logged only)
//! - **Pictures**: blip records referenced from shapes (optional)
//!
//! Every other stream is only scanned for embedded pictures.

use super::current_user::CurrentUser;
use super::parsers::{DocumentInfo, SlideContext, extract_shapes};
use super::records::{RecordCursor, RecordHeader, RecordType};
use super::text::synthesize_title_body;
use crate::common::{Error, Result};
use crate::images::PicturePool;
use crate::ole::OleFile;
use crate::presentation::{DecodeOptions, DeckParser, Shape, Slide};

/// Name of the main record stream.
pub const DOCUMENT_STREAM: &str = "PowerPoint Document";
/// Name of the current user stream.
pub const CURRENT_USER_STREAM: &str = "Current User";
/// Name of the picture stream.
pub const PICTURES_STREAM: &str = "Pictures";

/// Parser for binary PowerPoint files.
///
/// # Examples
///
/// ```rust,no_run
/// use deckread::{DecodeOptions, DeckParser};
/// use deckread::ole::ppt::PptDeckParser;
///
/// let bytes = std::fs::read("presentation.ppt")?;
/// let slides = PptDeckParser.parse(&bytes, &DecodeOptions::default())?;
/// for slide in &slides {
///     println!("{}: {} shapes", slide.path, slide.shapes.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PptDeckParser;

/// The streams of a .ppt file, already read from the compound file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptStreams<'a> {
    pub document: &'a [u8],
    pub current_user: Option<&'a [u8]>,
    pub pictures: Option<&'a [u8]>,
    /// Streams that are only scanned for pictures
    pub others: &'a [&'a [u8]],
}

impl<'a> PptStreams<'a> {
    pub fn new(document: &'a [u8]) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    pub fn with_current_user(mut self, data: &'a [u8]) -> Self {
        self.current_user = Some(data);
        self
    }

    pub fn with_pictures(mut self, data: &'a [u8]) -> Self {
        self.pictures = Some(data);
        self
    }

    pub fn with_others(mut self, others: &'a [&'a [u8]]) -> Self {
        self.others = others;
        self
    }

    /// Every stream, for signature scanning.
    fn all(self) -> impl Iterator<Item = &'a [u8]> {
        std::iter::once(self.document)
            .chain(self.current_user)
            .chain(self.pictures)
            .chain(self.others.iter().copied())
    }
}

impl DeckParser for PptDeckParser {
    fn parse(&self, data: &[u8], options: &DecodeOptions) -> Result<Vec<Slide>> {
        let mut ole = OleFile::open(data)?;
        let document = ole.open_stream(DOCUMENT_STREAM).map_err(|e| match e {
            Error::ComponentNotFound(_) => Error::InvalidFormat(format!(
                "Not a PowerPoint document: {} stream not found",
                DOCUMENT_STREAM
            )),
            other => other,
        })?;

        let current_user = ole.open_stream(CURRENT_USER_STREAM).ok();
        let pictures = ole.open_stream(PICTURES_STREAM).ok();

        let mut others = Vec::new();
        for name in ole.list_streams() {
            if matches!(name.as_str(), DOCUMENT_STREAM | CURRENT_USER_STREAM | PICTURES_STREAM) {
                continue;
            }
            match ole.open_stream(&name) {
                Ok(bytes) => others.push(bytes),
                Err(e) => log::warn!("Skipping unreadable stream {}: {}", name, e),
            }
        }
        let other_refs: Vec<&[u8]> = others.iter().map(Vec::as_slice).collect();

        let mut streams = PptStreams::new(&document).with_others(&other_refs);
        if let Some(bytes) = current_user.as_deref() {
            streams = streams.with_current_user(bytes);
        }
        if let Some(bytes) = pictures.as_deref() {
            streams = streams.with_pictures(bytes);
        }

        self.parse_streams(&streams, options)
    }
}

impl PptDeckParser {
    /// Decode slides from streams already read out of the compound file.
    ///
    /// Fails only when the document stream does not start with a readable
    /// record header; malformed records further in are skipped.
    pub fn parse_streams(&self, streams: &PptStreams, options: &DecodeOptions) -> Result<Vec<Slide>> {
        RecordHeader::parse(streams.document, 0).map_err(|e| {
            Error::CorruptedFile(format!("{} stream is unusable: {}", DOCUMENT_STREAM, e))
        })?;

        if let Some(data) = streams.current_user {
            match CurrentUser::parse(data) {
                Ok(user) => {
                    if user.is_encrypted() {
                        log::warn!("Document is marked as encrypted; text may be unreadable");
                    } else if !user.has_known_token() {
                        log::debug!("Current User stream has an unknown header token");
                    }
                    log::debug!(
                        "Current user {:?}, current edit at offset {}",
                        user.username(),
                        user.current_edit_offset()
                    );
                },
                Err(e) => log::debug!("Ignoring unreadable Current User stream: {}", e),
            }
        }

        let top_level: Vec<_> = RecordCursor::new(streams.document).collect();
        let mut info = top_level
            .iter()
            .find(|r| r.record_type() == RecordType::Document)
            .map(DocumentInfo::from_document)
            .unwrap_or_default();
        let size = info.slide_size();

        let pool = PicturePool::new(std::mem::take(&mut info.blip_store), streams.pictures, streams.all());

        let limit = options.slide_limit(None);
        let mut slides = Vec::new();
        for (index, record) in top_level
            .iter()
            .filter(|r| r.record_type() == RecordType::Slide)
            .take(limit)
            .enumerate()
        {
            let outline_texts = info.texts_for(index);
            let ctx = SlideContext {
                size,
                outline_texts,
                pictures: &pool,
            };
            let found = extract_shapes(record, &ctx);

            let mut slide = Slide::new(format!("slide{}", index + 1), size);
            slide.background = found.background;
            slide.shapes = found.shapes;

            let has_text = slide
                .shapes
                .iter()
                .filter_map(Shape::text_body)
                .any(|body| body.has_visible_text());
            if !has_text {
                slide.shapes.extend(synthesize_title_body(outline_texts, size));
            }
            slides.push(slide);
        }

        if options.picture_fallback {
            pool.apply_fallback(&mut slides);
        }

        log::debug!("Decoded {} slides from binary presentation", slides.len());
        Ok(slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::ppt::records::testing::{atom, container, container_with_instance, opt, utf16};
    use std::io::{Cursor, Write};

    fn text_shape(left: i32, top: i32, right: i32, bottom: i32, text: &str) -> Vec<u8> {
        let mut children = Vec::new();
        let mut sp = 2u32.to_le_bytes().to_vec();
        sp.extend_from_slice(&0x0A00u32.to_le_bytes());
        children.extend(atom(0xF00A, 202, &sp));
        children.extend(opt(&[(0x0004, left), (0x0005, top), (0x0006, right), (0x0007, bottom)]));
        children.extend(container(0xF00D, &atom(4000, 0, &utf16(text))));
        container(0xF004, &children)
    }

    fn slide_with(shapes: &[u8]) -> Vec<u8> {
        let mut children = atom(1007, 2, &[0; 24]);
        children.extend(container(1036, &container(0xF002, &container(0xF003, shapes))));
        container(1006, &children)
    }

    #[test]
    fn test_single_text_shape_end_to_end() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut stream = container(1000, &atom(1001, 1, &[0; 40]));
        stream.extend(slide_with(&text_shape(0, 0, 914_400, 914_400, "Hi")));

        let slides = PptDeckParser
            .parse_streams(&PptStreams::new(&stream), &DecodeOptions::default())
            .unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].shapes.len(), 1);
        let shape = &slides[0].shapes[0];
        assert_eq!(shape.kind(), "text");
        assert_eq!(shape.bounds(), crate::BoundingBox::new(0, 0, 96, 96));
        assert_eq!(shape.text_body().unwrap().paragraphs[0].runs[0].text, "Hi");
        assert_eq!(slides[0].size, crate::SlideSize::DEFAULT);

        let json = serde_json::to_value(&crate::SlideDeck::new(slides)).unwrap();
        assert_eq!(json[0]["shapes"][0]["type"], "text");
        assert_eq!(json[0]["shapes"][0]["box"]["cx"], 96);
    }

    #[test]
    fn test_outline_text_synthesised() {
        let mut slwt = atom(1011, 0, &[0; 20]);
        slwt.extend(atom(4000, 0, &utf16("Agenda")));
        slwt.extend(atom(4000, 0, &utf16("Item one\rItem two")));
        let mut stream = container(1000, &container_with_instance(4080, 0, &slwt));
        stream.extend(slide_with(&[]));

        let slides = PptDeckParser
            .parse_streams(&PptStreams::new(&stream), &DecodeOptions::default())
            .unwrap();
        let texts: Vec<String> = slides[0]
            .shapes
            .iter()
            .filter_map(Shape::text_body)
            .map(|b| b.text())
            .collect();
        assert_eq!(texts, vec!["Agenda".to_string(), "Item one\nItem two".to_string()]);
    }

    #[test]
    fn test_bounds_only_shape_end_to_end() {
        let shape = container(0xF004, &opt(&[(0x0004, 0), (0x0005, 0), (0x0006, 9525), (0x0007, 9525)]));
        let mut stream = container(1000, &[]);
        stream.extend(slide_with(&shape));

        let options = DecodeOptions::new().with_picture_fallback(false);
        let slides = PptDeckParser
            .parse_streams(&PptStreams::new(&stream), &options)
            .unwrap();
        assert_eq!(slides[0].shapes.len(), 1);
        assert_eq!(slides[0].shapes[0].kind(), "shape");
        assert_eq!(slides[0].shapes[0].bounds(), crate::BoundingBox::new(0, 0, 1, 1));
    }

    #[test]
    fn test_slide_limit_and_order() {
        let mut stream = container(1000, &[]);
        for text in ["one", "two", "three"] {
            stream.extend(slide_with(&text_shape(0, 0, 9525, 9525, text)));
        }
        // An unknown top-level record between slides does not disturb the walk
        stream.extend(atom(0x7777, 0, &[0xAB; 17]));

        let options = DecodeOptions::new().with_max_slides(2);
        let slides = PptDeckParser
            .parse_streams(&PptStreams::new(&stream), &options)
            .unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].path, "slide2");
        assert_eq!(slides[1].text(), "two");
    }

    #[test]
    fn test_corrupt_shape_does_not_abort() {
        let mut broken = atom(0xF00A, 1, &[1]);
        broken.extend(atom(0xF00B, 40, &[0xFF; 7]));
        let mut shapes = container(0xF004, &broken);
        shapes.extend(text_shape(0, 0, 952_500, 952_500, "still here"));

        let mut stream = container(1000, &[]);
        stream.extend(slide_with(&shapes));
        let slides = PptDeckParser
            .parse_streams(&PptStreams::new(&stream), &DecodeOptions::default())
            .unwrap();
        assert_eq!(slides[0].text(), "still here");
    }

    #[test]
    fn test_unusable_document_stream() {
        let err = PptDeckParser.parse_streams(&PptStreams::new(&[1, 2, 3]), &DecodeOptions::default());
        assert!(matches!(err, Err(Error::CorruptedFile(_))));
    }

    #[test]
    fn test_compound_file_without_document_stream() {
        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_stream("/Other").unwrap().write_all(b"data").unwrap();
        comp.flush().unwrap();
        let bytes = comp.into_inner().into_inner();

        let err = PptDeckParser.parse(&bytes, &DecodeOptions::default());
        assert!(matches!(err, Err(Error::InvalidFormat(_))));
        assert!(matches!(
            PptDeckParser.parse(b"not a compound file", &DecodeOptions::default()),
            Err(Error::NotOleFile)
        ));
    }

    #[test]
    fn test_compound_file_round_trip() {
        let mut stream = container(1000, &[]);
        stream.extend(slide_with(&text_shape(0, 0, 914_400, 457_200, "From OLE")));

        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_stream("/PowerPoint Document").unwrap().write_all(&stream).unwrap();
        comp.flush().unwrap();
        let bytes = comp.into_inner().into_inner();

        let slides = PptDeckParser.parse(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].shapes[0].bounds(), crate::BoundingBox::new(0, 0, 96, 48));
    }
}
