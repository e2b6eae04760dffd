/// Current User stream parser.
///
/// The `Current User` stream holds a single `CurrentUserAtom` pointing at the
/// latest edit in the document stream. The decoder walks the document stream
/// physically and never follows that pointer, so the atom is parsed only to
/// report what kind of file it is looking at.
use crate::common::Result;
use crate::common::binary::{decode_codepage, decode_utf16le, read_u16_le, read_u32_le};
use crate::common::error::Error;
use crate::ole::ppt::records::{HEADER_SIZE, RecordHeader, RecordType};

/// Token of an unencrypted document.
pub const HEADER_TOKEN_PLAIN: u32 = 0xE391_C05F;
/// Token of an encrypted document.
pub const HEADER_TOKEN_ENCRYPTED: u32 = 0xF3D1_C4DF;

/// Fixed part of the atom after the record header.
const FIXED_SIZE: usize = 20;

/// Contents of the `CurrentUserAtom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Offset of the current `UserEditAtom` in the document stream
    current_edit_offset: u32,
    header_token: u32,
    doc_file_version: u16,
    username: String,
}

impl CurrentUser {
    /// Parse the stream contents.
    ///
    /// # Format
    ///
    /// - Bytes 0-7: record header (type 0x0FF6)
    /// - Bytes 8-11: size of the fixed part (always 20)
    /// - Bytes 12-15: header token
    /// - Bytes 16-19: offset to current edit
    /// - Bytes 20-21: length of the ANSI user name
    /// - Bytes 22-23: document file version
    /// - Bytes 24-27: version numbers and padding
    /// - Bytes 28..: ANSI user name, release version, optional UTF-16 user name
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = RecordHeader::parse(data, 0)?;
        if header.record_type != RecordType::CurrentUserAtom {
            return Err(Error::InvalidFormat(format!(
                "Current User stream starts with record type 0x{:04X}",
                header.record_type.raw()
            )));
        }

        let base = HEADER_SIZE;
        let size = read_u32_le(data, base)? as usize;
        if size != FIXED_SIZE {
            log::debug!("CurrentUserAtom declares unusual fixed size {}", size);
        }
        let header_token = read_u32_le(data, base + 4)?;
        let current_edit_offset = read_u32_le(data, base + 8)?;
        let name_len = read_u16_le(data, base + 12)? as usize;
        let doc_file_version = read_u16_le(data, base + 14)?;

        let ansi_start = base + FIXED_SIZE;
        let ansi_end = (ansi_start + name_len).min(data.len());
        let ansi_name = decode_codepage(data.get(ansi_start..ansi_end).unwrap_or_default(), 1252);

        // Unicode user name follows the 4-byte release version, when present
        let unicode_start = ansi_end + 4;
        let unicode_end = unicode_start + name_len * 2;
        let username = match data.get(unicode_start..unicode_end) {
            Some(bytes) if name_len > 0 => decode_utf16le(bytes),
            _ => ansi_name,
        };

        Ok(Self {
            current_edit_offset,
            header_token,
            doc_file_version,
            username,
        })
    }

    #[inline]
    pub fn current_edit_offset(&self) -> u32 {
        self.current_edit_offset
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[inline]
    pub fn doc_file_version(&self) -> u16 {
        self.doc_file_version
    }

    /// Whether the header token marks the document as encrypted.
    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.header_token == HEADER_TOKEN_ENCRYPTED
    }

    /// Whether the header token is one of the two known values.
    #[inline]
    pub fn has_known_token(&self) -> bool {
        matches!(self.header_token, HEADER_TOKEN_PLAIN | HEADER_TOKEN_ENCRYPTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::ppt::records::testing::atom;

    fn current_user_stream(token: u32, name: &str) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&20u32.to_le_bytes());
        payload.extend_from_slice(&token.to_le_bytes());
        payload.extend_from_slice(&0x1234u32.to_le_bytes());
        payload.extend_from_slice(&(name.len() as u16).to_le_bytes());
        payload.extend_from_slice(&0x03F4u16.to_le_bytes());
        payload.extend_from_slice(&[3, 0, 0, 0]);
        payload.extend_from_slice(name.as_bytes());
        payload.extend_from_slice(&8u32.to_le_bytes());
        payload.extend(name.encode_utf16().flat_map(u16::to_le_bytes));
        atom(0x0FF6, 0, &payload)
    }

    #[test]
    fn test_parse_plain() {
        let user = CurrentUser::parse(&current_user_stream(HEADER_TOKEN_PLAIN, "ada")).unwrap();
        assert_eq!(user.current_edit_offset(), 0x1234);
        assert_eq!(user.username(), "ada");
        assert_eq!(user.doc_file_version(), 0x03F4);
        assert!(user.has_known_token());
        assert!(!user.is_encrypted());
    }

    #[test]
    fn test_parse_encrypted_token() {
        let user = CurrentUser::parse(&current_user_stream(HEADER_TOKEN_ENCRYPTED, "x")).unwrap();
        assert!(user.is_encrypted());
    }

    #[test]
    fn test_too_short() {
        assert!(CurrentUser::parse(&[0u8; 12]).is_err());
        assert!(CurrentUser::parse(&atom(4000, 0, &[0; 24])).is_err());
    }
}
