//! Picture discovery by signature scanning.
//!
//! Independently of the record tree, every stream of a binary presentation
//! is scanned for embedded JPEG, PNG and GIF files and for EMF metafiles.
//! A candidate is accepted only when its internal structure can be walked to
//! a proper end marker, which keeps false positives inside unrelated binary
//! data rare. Candidates that start inside an already accepted picture are
//! skipped.

use super::Picture;
use memchr::memmem;
use std::collections::BTreeMap;
use zerocopy::FromBytes;
use zerocopy::byteorder::{BE, LE, U16, U32};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const GIF_MAGIC: &[u8] = b"GIF8";
const EMF_SIGNATURE: &[u8] = b" EMF";
/// Offset of the ` EMF` signature inside the EMF header record.
const EMF_SIGNATURE_OFFSET: usize = 40;

fn be_u16(data: &[u8], offset: usize) -> Option<u16> {
    U16::<BE>::read_from_bytes(data.get(offset..offset.checked_add(2)?)?)
        .ok()
        .map(|v| v.get())
}

fn be_u32(data: &[u8], offset: usize) -> Option<u32> {
    U32::<BE>::read_from_bytes(data.get(offset..offset.checked_add(4)?)?)
        .ok()
        .map(|v| v.get())
}

fn le_u32(data: &[u8], offset: usize) -> Option<u32> {
    U32::<LE>::read_from_bytes(data.get(offset..offset.checked_add(4)?)?)
        .ok()
        .map(|v| v.get())
}

/// Find every recognisable picture in `data`, in order of appearance.
pub fn scan_pictures(data: &[u8]) -> Vec<Picture> {
    let mut candidates: Vec<(usize, usize, &'static str)> = Vec::new();

    let mut entropy = EntropySegments::default();
    let mut jpeg_covered = 0;
    for start in memmem::find_iter(data, JPEG_MAGIC) {
        // Anything nested in an accepted JPEG would be dropped below
        if start < jpeg_covered {
            continue;
        }
        if let Some(end) = jpeg_end(data, start, &mut entropy) {
            candidates.push((start, end, "image/jpeg"));
            jpeg_covered = end;
        }
    }
    for start in memmem::find_iter(data, PNG_MAGIC) {
        if let Some(end) = png_end(data, start) {
            candidates.push((start, end, "image/png"));
        }
    }
    for start in memmem::find_iter(data, GIF_MAGIC) {
        if let Some(end) = gif_end(data, start) {
            candidates.push((start, end, "image/gif"));
        }
    }
    for sig in memmem::find_iter(data, EMF_SIGNATURE) {
        if let Some(start) = sig.checked_sub(EMF_SIGNATURE_OFFSET)
            && let Some(end) = emf_end(data, start)
        {
            candidates.push((start, end, "image/x-emf"));
        }
    }

    candidates.sort_by_key(|&(start, end, _)| (start, std::cmp::Reverse(end)));

    let mut pictures = Vec::new();
    let mut covered = 0;
    for (start, end, mime) in candidates {
        if start < covered {
            continue;
        }
        pictures.push(Picture::new(mime, data[start..end].to_vec()));
        covered = end;
    }
    pictures
}

/// Entropy-coded ranges already scanned, keyed by start.
///
/// Every 0xFF inside a scanned range is stuffing or a restart marker, so a
/// scan entering the range anywhere stops at the same end.
#[derive(Debug, Default)]
struct EntropySegments {
    ranges: BTreeMap<usize, usize>,
}

impl EntropySegments {
    /// End of the entropy-coded data at `pos`: the offset of the first
    /// marker that is not stuffing or a restart.
    fn end_from(&mut self, data: &[u8], pos: usize) -> Option<usize> {
        if let Some((_, &end)) = self.ranges.range(..=pos).next_back()
            && pos < end
        {
            return Some(end);
        }

        let mut cur = pos;
        loop {
            let ff = memchr::memchr(0xFF, data.get(cur..)?)?;
            cur += ff;
            let next = *data.get(cur + 1)?;
            if next == 0x00 || (0xD0..=0xD7).contains(&next) || next == 0xFF {
                cur += if next == 0xFF { 1 } else { 2 };
                continue;
            }
            break;
        }
        self.ranges.insert(pos, cur);
        Some(cur)
    }
}

/// End of a JPEG stream starting at `start`, found by walking its segments.
fn jpeg_end(data: &[u8], start: usize, entropy: &mut EntropySegments) -> Option<usize> {
    let mut pos = start + 2;
    loop {
        if *data.get(pos)? != 0xFF {
            return None;
        }
        // Fill bytes
        while *data.get(pos + 1)? == 0xFF {
            pos += 1;
        }
        let marker = *data.get(pos + 1)?;
        pos += 2;
        match marker {
            0xD9 => return Some(pos),
            0x01 | 0xD0..=0xD7 => continue,
            0x00 => return None,
            _ => {},
        }

        let len = be_u16(data, pos)? as usize;
        if len < 2 {
            return None;
        }
        pos = pos.checked_add(len)?;
        if pos > data.len() {
            return None;
        }

        if marker == 0xDA {
            pos = entropy.end_from(data, pos)?;
        }
    }
}

/// End of a PNG stream starting at `start`, found by walking chunks to IEND.
fn png_end(data: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + PNG_MAGIC.len();
    loop {
        let len = be_u32(data, pos)? as usize;
        let kind = data.get(pos + 4..pos + 8)?;
        if !kind.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        let end = pos.checked_add(12)?.checked_add(len)?;
        if end > data.len() {
            return None;
        }
        pos = end;
        if kind == b"IEND" {
            return Some(pos);
        }
    }
}

/// End of a GIF stream starting at `start`, found by walking its blocks.
fn gif_end(data: &[u8], start: usize) -> Option<usize> {
    let version = data.get(start + 4..start + 6)?;
    if version != b"7a" && version != b"9a" {
        return None;
    }
    let packed = *data.get(start + 10)?;
    let mut pos = start + 13;
    if packed & 0x80 != 0 {
        pos += 3 * (1usize << ((packed & 0x07) + 1));
    }

    loop {
        match *data.get(pos)? {
            0x3B => return Some(pos + 1),
            0x2C => {
                let packed = *data.get(pos + 9)?;
                pos += 10;
                if packed & 0x80 != 0 {
                    pos += 3 * (1usize << ((packed & 0x07) + 1));
                }
                // LZW minimum code size
                pos += 1;
                pos = skip_sub_blocks(data, pos)?;
            },
            0x21 => {
                pos = skip_sub_blocks(data, pos + 2)?;
            },
            _ => return None,
        }
    }
}

fn skip_sub_blocks(data: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        let size = *data.get(pos)? as usize;
        pos += 1;
        if size == 0 {
            return Some(pos);
        }
        pos += size;
    }
}

/// End of an EMF stream whose header record starts at `start`.
///
/// The header record has type 1 and records the total file size at
/// offset 48.
fn emf_end(data: &[u8], start: usize) -> Option<usize> {
    if le_u32(data, start)? != 1 {
        return None;
    }
    let header_size = le_u32(data, start + 4)? as usize;
    let total = le_u32(data, start + 48)? as usize;
    if header_size < 88 || total < header_size {
        return None;
    }
    let end = start.checked_add(total)?;
    (end <= data.len()).then_some(end)
}
