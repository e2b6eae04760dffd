//! Binary data parsing utilities shared across formats.
//!
//! This module provides common functions for reading little-endian integers
//! and decoding the legacy text encodings (UTF-16LE, 8-bit code pages) used by
//! binary presentation records.

use zerocopy::{FromBytes, I16, I32, LE, U16, U32};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

#[inline]
fn window(data: &[u8], offset: usize, width: usize) -> BinaryResult<&[u8]> {
    let end = offset.checked_add(width).unwrap_or(usize::MAX);
    if end > data.len() {
        return Err(BinaryError::InsufficientData {
            expected: end,
            available: data.len(),
        });
    }
    Ok(&data[offset..end])
}

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use deckread::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> BinaryResult<u16> {
    let bytes = window(data, offset, 2)?;
    Ok(U16::<LE>::read_from_bytes(bytes).map(|v| v.get()).unwrap_or(0))
}

/// Read a little-endian i16 from a byte slice at the given offset.
///
/// ```
/// use deckread::common::binary::read_i16_le;
/// assert_eq!(read_i16_le(&[0xFF, 0xFF], 0).unwrap(), -1i16);
/// ```
#[inline]
pub fn read_i16_le(data: &[u8], offset: usize) -> BinaryResult<i16> {
    let bytes = window(data, offset, 2)?;
    Ok(I16::<LE>::read_from_bytes(bytes).map(|v| v.get()).unwrap_or(0))
}

/// Read a little-endian u32 from a byte slice at the given offset.
///
/// ```
/// use deckread::common::binary::read_u32_le;
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32_le(&data, 0).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> BinaryResult<u32> {
    let bytes = window(data, offset, 4)?;
    Ok(U32::<LE>::read_from_bytes(bytes).map(|v| v.get()).unwrap_or(0))
}

/// Read a little-endian i32 from a byte slice at the given offset.
#[inline]
pub fn read_i32_le(data: &[u8], offset: usize) -> BinaryResult<i32> {
    let bytes = window(data, offset, 4)?;
    Ok(I32::<LE>::read_from_bytes(bytes).map(|v| v.get()).unwrap_or(0))
}

/// Largest buffer reserved up front from a container's declared size.
const MAX_RESERVE: u64 = 16 * 1024 * 1024;

/// Initial capacity for an entry or stream whose header claims `declared`
/// bytes. Past the cap the buffer grows as data actually arrives.
#[inline]
pub fn reserve_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_RESERVE)).unwrap_or(0)
}

/// Decode UTF-16LE text.
///
/// A trailing odd byte is ignored and unpaired surrogates become U+FFFD.
/// Decoding stops at the first NUL code unit.
///
/// ```
/// use deckread::common::binary::decode_utf16le;
/// let data = [0x48, 0x00, 0x69, 0x00, 0x00, 0x00, 0x21, 0x00];
/// assert_eq!(decode_utf16le(&data), "Hi");
/// ```
pub fn decode_utf16le(data: &[u8]) -> String {
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0);

    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Decode 8-bit text in a Windows code page.
///
/// Unknown code pages fall back to Windows-1252, which is what PowerPoint
/// writes for "bytes" text atoms on western systems.
///
/// ```
/// use deckread::common::binary::decode_codepage;
/// assert_eq!(decode_codepage(b"caf\xE9", 1252), "café");
/// assert_eq!(decode_codepage(b"\x93quoted\x94", 1252), "\u{201C}quoted\u{201D}");
/// ```
#[cfg(feature = "ole")]
pub fn decode_codepage(data: &[u8], codepage: u32) -> String {
    let encoding = codepage_to_encoding(codepage).unwrap_or(encoding_rs::WINDOWS_1252);
    let end = memchr::memchr(0, data).unwrap_or(data.len());
    let (text, _, _) = encoding.decode(&data[..end]);
    text.into_owned()
}

/// Map a Windows code page identifier to an `encoding_rs` encoding.
#[cfg(feature = "ole")]
#[inline]
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static encoding_rs::Encoding> {
    match codepage {
        874 => Some(encoding_rs::WINDOWS_874),
        932 => Some(encoding_rs::SHIFT_JIS),
        936 => Some(encoding_rs::GBK),
        949 => Some(encoding_rs::EUC_KR),
        950 => Some(encoding_rs::BIG5),
        1250 => Some(encoding_rs::WINDOWS_1250),
        1251 => Some(encoding_rs::WINDOWS_1251),
        1252 => Some(encoding_rs::WINDOWS_1252),
        1253 => Some(encoding_rs::WINDOWS_1253),
        1254 => Some(encoding_rs::WINDOWS_1254),
        1255 => Some(encoding_rs::WINDOWS_1255),
        1256 => Some(encoding_rs::WINDOWS_1256),
        1257 => Some(encoding_rs::WINDOWS_1257),
        1258 => Some(encoding_rs::WINDOWS_1258),
        10000 => Some(encoding_rs::MACINTOSH),
        65001 => Some(encoding_rs::UTF_8),
        _ => None,
    }
}
