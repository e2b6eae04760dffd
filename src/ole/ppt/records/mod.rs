//! PPT record types and parsing.
//!
//! This module provides the record header, a bounded sibling cursor and the
//! record type table shared by the document and drawing layers.
pub mod record;
pub mod types;

// Re-export commonly used types
pub use record::{HEADER_SIZE, Record, RecordCursor, RecordHeader};
pub use types::RecordType;

/// Builders for hand-assembled record streams.
#[cfg(test)]
pub(crate) mod testing {
    /// An atom record with the given type, instance and payload.
    pub(crate) fn atom(record_type: u16, instance: u16, payload: &[u8]) -> Vec<u8> {
        header(0x0, instance, record_type, payload)
    }

    /// A container record (version 0xF) wrapping already-encoded children.
    pub(crate) fn container(record_type: u16, children: &[u8]) -> Vec<u8> {
        header(0xF, 0, record_type, children)
    }

    /// A container with an explicit instance.
    pub(crate) fn container_with_instance(record_type: u16, instance: u16, children: &[u8]) -> Vec<u8> {
        header(0xF, instance, record_type, children)
    }

    fn header(version: u16, instance: u16, record_type: u16, payload: &[u8]) -> Vec<u8> {
        let ver_inst = (instance << 4) | (version & 0xF);
        let mut out = Vec::with_capacity(8 + payload.len());
        out.extend_from_slice(&ver_inst.to_le_bytes());
        out.extend_from_slice(&record_type.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    /// UTF-16LE bytes of a string.
    pub(crate) fn utf16(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    /// An OPT record holding simple `{id, value}` properties.
    pub(crate) fn opt(properties: &[(u16, i32)]) -> Vec<u8> {
        let mut payload = Vec::with_capacity(properties.len() * 6);
        for (id, value) in properties {
            payload.extend_from_slice(&id.to_le_bytes());
            payload.extend_from_slice(&value.to_le_bytes());
        }
        header(0x3, properties.len() as u16, 0xF00B, &payload)
    }
}
