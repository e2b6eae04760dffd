// BLIP (Binary Large Image or Picture) record parsing
//
// Pictures in a PowerPoint file are stored as OfficeArtBlip records, either
// in the `Pictures` stream (referenced by offset from the blip store) or
// inline after a blip store entry. Metafiles (EMF, WMF, PICT) carry a
// 34-byte header and are usually deflate-compressed; bitmaps (JPEG, PNG,
// DIB, TIFF) carry a one-byte tag before the raw file bytes.
//
// References:
// - [MS-ODRAW] 2.2.23: OfficeArtBlip records
// - [MS-ODRAW] 2.2.32: OfficeArtBSE

use super::Picture;
use crate::common::binary::{read_u16_le, read_u32_le};
use crate::ole::ppt::records::{HEADER_SIZE, RecordHeader, RecordType};
use std::io::Read;

const UID_SIZE: usize = 16;
const METAFILE_HEADER_SIZE: usize = 34;
/// Fixed part of a blip store entry before its name.
const BSE_FIXED_SIZE: usize = 36;
/// `compression` byte value for deflate-compressed metafiles.
const COMPRESSION_DEFLATE: u8 = 0;

/// Type of BLIP record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlipType {
    /// Enhanced Metafile (EMF)
    Emf,
    /// Windows Metafile (WMF)
    Wmf,
    /// Macintosh PICT
    Pict,
    /// JPEG (RGB or CMYK)
    Jpeg,
    /// PNG
    Png,
    /// Device Independent Bitmap (DIB)
    Dib,
    /// TIFF
    Tiff,
}

impl BlipType {
    /// Parse BlipType from record type ID
    pub fn from_record_id(record_id: u16) -> Option<Self> {
        match record_id {
            0xF01A => Some(Self::Emf),
            0xF01B => Some(Self::Wmf),
            0xF01C => Some(Self::Pict),
            0xF01D | 0xF02A => Some(Self::Jpeg),
            0xF01E => Some(Self::Png),
            0xF01F => Some(Self::Dib),
            0xF029 => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Check if this is a metafile format (EMF, WMF, PICT)
    pub const fn is_metafile(&self) -> bool {
        matches!(self, Self::Emf | Self::Wmf | Self::Pict)
    }

    /// MIME type of the decoded picture bytes.
    pub const fn mime(&self) -> &'static str {
        match self {
            Self::Emf => "image/x-emf",
            Self::Wmf => "image/x-wmf",
            Self::Pict => "image/x-pict",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Dib => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }
}

/// Decode the blip record starting at `offset`.
///
/// Returns the picture and the offset just past the record. Unknown record
/// types and truncated headers yield `None`.
pub fn parse_blip_at(data: &[u8], offset: usize) -> Option<(Picture, usize)> {
    let header = RecordHeader::parse(data, offset).ok()?;
    let start = offset + HEADER_SIZE;
    let end = start.saturating_add(header.length as usize).min(data.len());
    let picture = parse_blip(&header, &data[start..end])?;
    Some((picture, end))
}

/// Decode a blip record payload.
pub fn parse_blip(header: &RecordHeader, payload: &[u8]) -> Option<Picture> {
    let blip_type = BlipType::from_record_id(header.record_type.raw())?;
    // Odd instances carry a second UID
    let uid_len = if header.instance & 1 == 1 {
        UID_SIZE * 2
    } else {
        UID_SIZE
    };

    if blip_type.is_metafile() {
        let meta = payload.get(uid_len..uid_len + METAFILE_HEADER_SIZE)?;
        let uncompressed_size = read_u32_le(meta, 0).ok()? as usize;
        let compressed_size = read_u32_le(meta, 28).ok()? as usize;
        let compression = meta[32];

        let body_start = uid_len + METAFILE_HEADER_SIZE;
        let body_end = body_start.saturating_add(compressed_size).min(payload.len());
        let body = &payload[body_start..body_end];

        let bytes = if compression == COMPRESSION_DEFLATE {
            match inflate(body, uncompressed_size) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::debug!("Failed to inflate {:?} blip: {}", blip_type, e);
                    return None;
                },
            }
        } else {
            body.to_vec()
        };
        return Some(Picture::new(blip_type.mime(), bytes));
    }

    // Bitmaps: UID(s) then a one-byte tag
    let body = payload.get(uid_len + 1..)?;
    let bytes = if blip_type == BlipType::Dib {
        dib_to_bmp(body)?
    } else {
        body.to_vec()
    };
    Some(Picture::new(blip_type.mime(), bytes))
}

/// Inflate metafile data, accepting both zlib-wrapped and raw deflate.
fn inflate(data: &[u8], size_hint: usize) -> std::io::Result<Vec<u8>> {
    // Cap the hint so a corrupt size field cannot force a huge allocation
    let mut out = Vec::with_capacity(size_hint.min(data.len().saturating_mul(16)));
    if data.first() == Some(&0x78) {
        flate2::read::ZlibDecoder::new(data).read_to_end(&mut out)?;
    } else {
        flate2::read::DeflateDecoder::new(data).read_to_end(&mut out)?;
    }
    Ok(out)
}

/// Prefix a packed DIB with a BITMAPFILEHEADER so it is a valid BMP file.
pub fn dib_to_bmp(dib: &[u8]) -> Option<Vec<u8>> {
    let header_size = read_u32_le(dib, 0).ok()? as usize;
    if header_size < 12 || header_size > dib.len() {
        return None;
    }

    let palette_size = if header_size >= 40 {
        let bit_count = read_u16_le(dib, 14).ok()? as u32;
        let compression = read_u32_le(dib, 16).ok()?;
        let colors_used = read_u32_le(dib, 32).ok()?;
        let entries = match colors_used {
            0 if bit_count <= 8 => 1u32 << bit_count,
            n => n,
        };
        // BI_BITFIELDS masks follow a BITMAPINFOHEADER
        let masks = if compression == 3 && header_size == 40 {
            12
        } else {
            0
        };
        entries as usize * 4 + masks
    } else {
        // BITMAPCOREHEADER uses 3-byte palette entries
        let bit_count = read_u16_le(dib, 10).ok()? as u32;
        if bit_count <= 8 {
            (1usize << bit_count) * 3
        } else {
            0
        }
    };

    let file_size = 14 + dib.len();
    let pixel_offset = 14 + header_size + palette_size;
    let mut bmp = Vec::with_capacity(file_size);
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&(file_size as u32).to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
    bmp.extend_from_slice(dib);
    Some(bmp)
}

/// An entry of the blip store (`BStoreContainer`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlipStoreEntry {
    /// Picture type as a blip record type offset from 0xF018
    pub blip_type_win32: u8,
    /// Size of the blip record in the `Pictures` stream
    pub size: u32,
    pub ref_count: u32,
    /// Offset of the blip record in the `Pictures` stream
    pub offset: u32,
    /// Picture decoded from an inline blip record, if present
    pub inline: Option<Picture>,
}

impl BlipStoreEntry {
    /// Parse a BSE record payload.
    ///
    /// # Format
    /// ```text
    /// 0      btWin32
    /// 1      btMacOS
    /// 2-17   rgbUid
    /// 18-19  tag
    /// 20-23  size
    /// 24-27  cRef
    /// 28-31  foDelay
    /// 32     unused1
    /// 33     cbName
    /// 34-35  unused2, unused3
    /// 36..   name, then an optional inline blip record
    /// ```
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < BSE_FIXED_SIZE {
            return None;
        }
        let blip_type_win32 = data[0];
        let size = read_u32_le(data, 20).ok()?;
        let ref_count = read_u32_le(data, 24).ok()?;
        let offset = read_u32_le(data, 28).ok()?;
        let name_len = data[33] as usize;

        let blip_start = BSE_FIXED_SIZE + name_len;
        let inline = if data.len() > blip_start + HEADER_SIZE {
            parse_blip_at(data, blip_start).map(|(picture, _)| picture)
        } else {
            None
        };

        Some(Self {
            blip_type_win32,
            size,
            ref_count,
            offset,
            inline,
        })
    }
}

/// Parse every entry of a blip store container payload, keeping positions:
/// an unparseable entry is `None` so later references stay aligned.
pub fn parse_blip_store(bstore: &[u8]) -> Vec<Option<BlipStoreEntry>> {
    crate::ole::ppt::records::RecordCursor::new(bstore)
        .map(|record| match record.record_type() {
            RecordType::Bse => BlipStoreEntry::parse(record.data),
            other => {
                log::debug!("Unexpected {:?} record in blip store", other);
                None
            },
        })
        .collect()
}

/// Decode every blip record of the `Pictures` stream in order.
///
/// Returns `(offset, picture)` pairs; the walk stops at the first record
/// whose header cannot be read.
pub fn parse_pictures_stream(data: &[u8]) -> Vec<(usize, Picture)> {
    let mut pictures = Vec::new();
    let mut offset = 0;
    while offset + HEADER_SIZE <= data.len() {
        let Ok(header) = RecordHeader::parse(data, offset) else {
            break;
        };
        let end = (offset + HEADER_SIZE)
            .saturating_add(header.length as usize)
            .min(data.len());
        match parse_blip(&header, &data[offset + HEADER_SIZE..end]) {
            Some(picture) => pictures.push((offset, picture)),
            None => log::debug!(
                "Skipping {:?} record at offset {} of the Pictures stream",
                header.record_type,
                offset
            ),
        }
        offset = end;
    }
    pictures
}
