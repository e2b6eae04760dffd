//! Record headers and a bounded cursor over sibling records.
//!
//! # Format
//!
//! Every record starts with an 8-byte header:
//! - Bytes 0-1: version (low 4 bits) and instance (high 12 bits)
//! - Bytes 2-3: record type
//! - Bytes 4-7: payload length
//!
//! A container's payload is itself a sequence of records. The cursor never
//! reads past the end of the slice it was given, and after each record it
//! jumps to exactly `start + 8 + length`, whether or not the record was
//! understood, so one bad record cannot shift the rest of the stream.

use super::types::RecordType;
use crate::common::binary::{BinaryResult, read_u16_le, read_u32_le};

/// Size of a record header in bytes.
pub const HEADER_SIZE: usize = 8;

/// A parsed record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Version (4 bits)
    pub version: u8,
    /// Instance (12 bits)
    pub instance: u16,
    /// Record type
    pub record_type: RecordType,
    /// Payload length as declared
    pub length: u32,
}

impl RecordHeader {
    /// Parse a header at `offset`.
    pub fn parse(data: &[u8], offset: usize) -> BinaryResult<Self> {
        let ver_inst = read_u16_le(data, offset)?;
        let raw_type = read_u16_le(data, offset + 2)?;
        let length = read_u32_le(data, offset + 4)?;

        Ok(Self {
            version: (ver_inst & 0x000F) as u8,
            instance: (ver_inst >> 4) & 0x0FFF,
            record_type: RecordType::from(raw_type),
            length,
        })
    }

    /// Container records have version 0xF or a known container type.
    #[inline]
    pub fn is_container(&self) -> bool {
        self.version == 0x0F || self.record_type.is_container()
    }
}

/// A record borrowed from its enclosing slice.
#[derive(Debug, Clone, Copy)]
pub struct Record<'data> {
    pub header: RecordHeader,
    /// Offset of the header within the slice the cursor walks
    pub offset: usize,
    /// Payload, cut short if the declared length overruns the parent
    pub data: &'data [u8],
}

impl<'data> Record<'data> {
    #[inline]
    pub fn record_type(&self) -> RecordType {
        self.header.record_type
    }

    #[inline]
    pub fn instance(&self) -> u16 {
        self.header.instance
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.header.is_container()
    }

    /// Cursor over the payload's child records.
    #[inline]
    pub fn children(&self) -> RecordCursor<'data> {
        RecordCursor::new(self.data)
    }

    /// First direct child of the given type.
    pub fn child(&self, record_type: RecordType) -> Option<Record<'data>> {
        self.children().find(|r| r.record_type() == record_type)
    }

    /// First record of the given type anywhere below this one, depth first.
    pub fn find_descendant(&self, record_type: RecordType) -> Option<Record<'data>> {
        for child in self.children() {
            if child.record_type() == record_type {
                return Some(child);
            }
            if child.is_container()
                && let Some(found) = child.find_descendant(record_type)
            {
                return Some(found);
            }
        }
        None
    }
}

/// Iterator over sibling records in a slice.
#[derive(Debug, Clone)]
pub struct RecordCursor<'data> {
    data: &'data [u8],
    pos: usize,
}

impl<'data> RecordCursor<'data> {
    pub fn new(data: &'data [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset within the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'data> Iterator for RecordCursor<'data> {
    type Item = Record<'data>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.data.len().saturating_sub(self.pos);
        if remaining == 0 {
            return None;
        }

        let start = self.pos;
        let header = match RecordHeader::parse(self.data, start) {
            Ok(header) => header,
            Err(_) => {
                log::warn!(
                    "Ignoring {} trailing byte(s) too short for a record header at offset {}",
                    remaining,
                    start
                );
                self.pos = self.data.len();
                return None;
            },
        };

        let payload_start = start + HEADER_SIZE;
        let declared_end = payload_start.saturating_add(header.length as usize);
        let end = declared_end.min(self.data.len());
        if declared_end > end {
            log::debug!(
                "Record {:?} at offset {} declares {} bytes but only {} remain",
                header.record_type,
                start,
                header.length,
                end - payload_start
            );
        }

        self.pos = end;
        Some(Record {
            header,
            offset: start,
            data: &self.data[payload_start..end],
        })
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// A record stream of arbitrary atoms, some with unknown types.
    fn stream_strategy() -> impl Strategy<Value = Vec<(u16, Vec<u8>)>> {
        prop::collection::vec(
            (
                prop_oneof![Just(4000u16), Just(4008u16), Just(0xF00Bu16), 0x2000u16..0x3000u16],
                prop::collection::vec(any::<u8>(), 0..64),
            ),
            1..12,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_cursor_advances_by_declared_length(records in stream_strategy()) {
            let mut stream = Vec::new();
            for (record_type, payload) in &records {
                stream.extend(super::super::testing::atom(*record_type, 0, payload));
            }

            let mut cursor = RecordCursor::new(&stream);
            for (record_type, payload) in &records {
                let record = cursor.next().unwrap();
                prop_assert_eq!(record.header.record_type, RecordType::from(*record_type));
                prop_assert_eq!(
                    cursor.position(),
                    record.offset + HEADER_SIZE + record.header.length as usize
                );
                prop_assert_eq!(record.data, payload.as_slice());
            }
            prop_assert!(cursor.next().is_none());
        }

        #[test]
        fn prop_cursor_never_reads_past_the_end(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let mut last = 0;
            for record in RecordCursor::new(&data) {
                prop_assert!(record.offset >= last);
                prop_assert!(record.offset + HEADER_SIZE + record.data.len() <= data.len());
                last = record.offset + HEADER_SIZE;
            }
        }
    }
}
