//! Text extraction from PPT text atoms.
//!
//! Text lives in `TextCharsAtom` (UTF-16LE) or `TextBytesAtom` (8-bit,
//! Windows-1252 on western systems) records. Paragraphs are separated by
//! `\r`; a vertical tab (`\x0B`) is a soft line break inside a paragraph.

use crate::common::binary::{decode_codepage, decode_utf16le, read_u32_le};
use crate::ole::ppt::records::{Record, RecordType};
use crate::presentation::{Paragraph, RunStyle, TextAlign, TextBody};

/// Code page used for `TextBytesAtom` contents.
const TEXT_BYTES_CODEPAGE: u32 = 1252;

/// Text type declared by a `TextHeaderAtom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Title,
    Body,
    Notes,
    Other,
    CenterBody,
    CenterTitle,
    HalfBody,
    QuarterBody,
    Unknown(u32),
}

impl From<u32> for TextType {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Title,
            1 => Self::Body,
            2 => Self::Notes,
            4 => Self::Other,
            5 => Self::CenterBody,
            6 => Self::CenterTitle,
            7 => Self::HalfBody,
            8 => Self::QuarterBody,
            other => Self::Unknown(other),
        }
    }
}

impl TextType {
    /// Parse a `TextHeaderAtom`.
    pub fn from_header_atom(record: &Record) -> Option<Self> {
        read_u32_le(record.data, 0).ok().map(Self::from)
    }

    /// Paragraph alignment implied by the text type.
    pub fn alignment(self) -> TextAlign {
        match self {
            Self::CenterBody | Self::CenterTitle => TextAlign::Center,
            _ => TextAlign::Left,
        }
    }
}

/// Parse a `TextCharsAtom` payload.
pub fn parse_text_chars_atom(data: &[u8]) -> String {
    decode_utf16le(data)
}

/// Parse a `TextBytesAtom` payload.
pub fn parse_text_bytes_atom(data: &[u8]) -> String {
    decode_codepage(data, TEXT_BYTES_CODEPAGE)
}

/// Text of a chars or bytes atom; `None` for any other record.
pub fn text_from_atom(record: &Record) -> Option<String> {
    match record.record_type() {
        RecordType::TextCharsAtom => Some(parse_text_chars_atom(record.data)),
        RecordType::TextBytesAtom => Some(parse_text_bytes_atom(record.data)),
        _ => None,
    }
}

/// Build a text body from raw atom text.
///
/// One paragraph per `\r`-separated segment; a trailing paragraph mark does
/// not produce an empty paragraph.
///
/// ```
/// use deckread::ole::ppt::text::text_to_body;
/// use deckread::{RunStyle, TextAlign};
///
/// let body = text_to_body("Title\rline one\x0Bline two\r", TextAlign::Left, &RunStyle::default());
/// assert_eq!(body.paragraphs.len(), 2);
/// assert_eq!(body.paragraphs[1].text(), "line one\nline two");
/// ```
pub fn text_to_body(text: &str, align: TextAlign, style: &RunStyle) -> TextBody {
    let text = text.strip_suffix('\r').unwrap_or(text);
    let paragraphs = text
        .split('\r')
        .map(|segment| {
            let mut paragraph = Paragraph::new();
            paragraph.align = align;
            paragraph.push_text(&segment.replace('\x0B', "\n"), style);
            paragraph
        })
        .collect();
    TextBody::new(paragraphs)
}

/// Text found in a shape's client text box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeText {
    pub text_type: Option<TextType>,
    pub text: Option<String>,
    /// Index into the slide's outline text list
    pub outline_ref: Option<usize>,
}

impl ShapeText {
    /// Read the atoms inside a `ClientTextbox` container.
    pub fn from_client_textbox(textbox: &Record) -> Self {
        let mut result = Self::default();
        for child in textbox.children() {
            match child.record_type() {
                RecordType::TextHeaderAtom => {
                    result.text_type = TextType::from_header_atom(&child);
                },
                RecordType::TextCharsAtom | RecordType::TextBytesAtom => {
                    let text = text_from_atom(&child).unwrap_or_default();
                    match result.text.as_mut() {
                        Some(existing) => {
                            existing.push('\r');
                            existing.push_str(&text);
                        },
                        None => result.text = Some(text),
                    }
                },
                RecordType::OutlineTextRefAtom => {
                    result.outline_ref = read_u32_le(child.data, 0).ok().map(|i| i as usize);
                },
                _ => {},
            }
        }
        result
    }
}

/// Outline text of each slide, from a `SlideListWithText` container.
///
/// Each `SlidePersistAtom` starts a new slide group; the text atoms that
/// follow it belong to that slide.
pub fn collect_slide_texts(slwt: &Record) -> Vec<Vec<String>> {
    let mut slides: Vec<Vec<String>> = Vec::new();
    for child in slwt.children() {
        match child.record_type() {
            RecordType::SlidePersistAtom => slides.push(Vec::new()),
            RecordType::TextCharsAtom | RecordType::TextBytesAtom => match slides.last_mut() {
                Some(texts) => texts.extend(text_from_atom(&child)),
                None => log::debug!("Text atom before the first slide persist atom"),
            },
            _ => {},
        }
    }
    slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::ppt::records::RecordCursor;
    use crate::ole::ppt::records::testing::{atom, container, container_with_instance, utf16};

    #[test]
    fn test_text_chars_atom_parsing() {
        let text_data = [0x48, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F, 0x00];
        assert_eq!(parse_text_chars_atom(&text_data), "Hello");
    }

    #[test]
    fn test_text_bytes_atom_parsing() {
        assert_eq!(parse_text_bytes_atom(b"Caf\xE9"), "Café");
    }

    #[test]
    fn test_text_keeps_markup_characters() {
        let body = text_to_body("A&B <c>", TextAlign::Left, &RunStyle::default());
        assert_eq!(body.paragraphs[0].runs[0].text, "A&B <c>");
    }

    #[test]
    fn test_client_textbox() {
        let mut children = atom(3999, 0, &6u32.to_le_bytes());
        children.extend(atom(4000, 0, &utf16("Hi")));
        let textbox = container(0xF00D, &children);
        let record = RecordCursor::new(&textbox).next().unwrap();

        let text = ShapeText::from_client_textbox(&record);
        assert_eq!(text.text_type, Some(TextType::CenterTitle));
        assert_eq!(text.text.as_deref(), Some("Hi"));
        assert_eq!(TextType::CenterTitle.alignment(), TextAlign::Center);
    }

    #[test]
    fn test_collect_slide_texts() {
        let mut children = atom(1011, 0, &[0; 20]);
        children.extend(atom(3999, 0, &0u32.to_le_bytes()));
        children.extend(atom(4000, 0, &utf16("Title")));
        children.extend(atom(4008, 0, b"Body"));
        children.extend(atom(1011, 0, &[0; 20]));
        children.extend(atom(4008, 0, b"Second"));
        let slwt = container_with_instance(4080, 0, &children);
        let record = RecordCursor::new(&slwt).next().unwrap();

        let texts = collect_slide_texts(&record);
        assert_eq!(texts, vec![vec!["Title".to_string(), "Body".to_string()], vec!["Second".to_string()]]);
    }
}
