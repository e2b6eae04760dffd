//! Escher shape property parsing (Opt records).
//!
//! An Opt record's instance field is the number of 6-byte property entries
//! `{id: u16, value: i32}` it holds. Entries whose id has the complex bit set
//! use `value` as the length of data stored after all entries, in entry order.
//!
//! PowerPoint may spread one shape's properties over the primary, secondary
//! (0xF121) and tertiary (0xF122) Opt records; [`EscherProperties::merge`]
//! folds them into one table.

use crate::common::binary::{read_i32_le, read_u16_le};
use crate::ole::ppt::records::{Record, RecordType};
use std::collections::HashMap;

const IS_COMPLEX: u16 = 0x8000;
const PROPERTY_ID_MASK: u16 = 0x3FFF;
const ENTRY_SIZE: usize = 6;

/// Fill is switched on (`fFilled`).
const FILL_FILLED: u32 = 0x0000_0010;
/// The `fFilled` bit is meaningful (`fUsefFilled`).
const FILL_USE_FILLED: u32 = 0x0010_0000;
/// High byte flag of a colour that refers to a scheme slot rather than RGB.
const COLOR_SCHEME_FLAG: u32 = 0x0800_0000;
/// Any flag in the high byte means the low 24 bits are not a literal RGB value.
const COLOR_FLAGS_MASK: u32 = 0xFF00_0000;

/// Shape property ids the decoder reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscherPropertyId {
    /// Left edge in EMU
    BoundsLeft,
    /// Top edge in EMU
    BoundsTop,
    /// Right edge in EMU
    BoundsRight,
    /// Bottom edge in EMU
    BoundsBottom,
    /// 1-based index into the blip store
    BlipToDisplay,
    /// Packed BGR fill colour
    FillColor,
    /// Fill style boolean flags
    FillStyleBooleans,
    /// Any other property number
    Other(u16),
}

impl From<u16> for EscherPropertyId {
    fn from(value: u16) -> Self {
        match value & PROPERTY_ID_MASK {
            0x0004 => Self::BoundsLeft,
            0x0005 => Self::BoundsTop,
            0x0006 => Self::BoundsRight,
            0x0007 => Self::BoundsBottom,
            0x0104 => Self::BlipToDisplay,
            0x0181 => Self::FillColor,
            0x01BF => Self::FillStyleBooleans,
            other => Self::Other(other),
        }
    }
}

/// Value of a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscherPropertyValue<'data> {
    /// 32-bit value stored in the entry itself
    Simple(i32),
    /// Variable-length data stored after the entries
    Complex(&'data [u8]),
}

/// Properties of one shape.
#[derive(Debug, Clone, Default)]
pub struct EscherProperties<'data> {
    properties: HashMap<EscherPropertyId, EscherPropertyValue<'data>>,
}

impl<'data> EscherProperties<'data> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the entries of an Opt record.
    ///
    /// A truncated record yields the entries that were complete. Complex data
    /// that runs past the record end is dropped without disturbing the
    /// entries before it.
    pub fn from_opt_record(opt: &Record<'data>) -> Self {
        let declared = opt.instance() as usize;
        let available = opt.data.len() / ENTRY_SIZE;
        if declared > available {
            log::debug!(
                "Opt record declares {} properties but holds only {}",
                declared,
                available
            );
        }
        let count = declared.min(available);

        let mut properties = HashMap::with_capacity(count);
        let mut complex_offset = count * ENTRY_SIZE;

        for index in 0..count {
            let offset = index * ENTRY_SIZE;
            let (Ok(id_raw), Ok(value)) =
                (read_u16_le(opt.data, offset), read_i32_le(opt.data, offset + 2))
            else {
                break;
            };

            let id = EscherPropertyId::from(id_raw);
            let value = if id_raw & IS_COMPLEX != 0 {
                let len = value.max(0) as usize;
                let end = complex_offset.saturating_add(len);
                let Some(bytes) = opt.data.get(complex_offset..end) else {
                    complex_offset = end;
                    continue;
                };
                complex_offset = end;
                EscherPropertyValue::Complex(bytes)
            } else {
                EscherPropertyValue::Simple(value)
            };
            properties.insert(id, value);
        }

        Self { properties }
    }

    /// Collect the properties from every Opt record directly inside a shape
    /// container. Later records override earlier ones.
    pub fn from_container(container: &Record<'data>) -> Self {
        let mut merged = Self::new();
        for child in container.children() {
            if matches!(
                child.record_type(),
                RecordType::Opt | RecordType::SecondaryOpt | RecordType::TertiaryOpt
            ) {
                merged.merge(Self::from_opt_record(&child));
            }
        }
        merged
    }

    /// Fold another property table into this one.
    pub fn merge(&mut self, other: EscherProperties<'data>) {
        self.properties.extend(other.properties);
    }

    #[inline]
    pub fn get(&self, id: EscherPropertyId) -> Option<&EscherPropertyValue<'data>> {
        self.properties.get(&id)
    }

    /// Simple integer value.
    #[inline]
    pub fn get_int(&self, id: EscherPropertyId) -> Option<i32> {
        match self.properties.get(&id) {
            Some(EscherPropertyValue::Simple(v)) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn has(&self, id: EscherPropertyId) -> bool {
        self.properties.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Bounds from properties 0x0004-0x0007, in EMU.
    ///
    /// Only returned when all four edges are present.
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        Some((
            self.get_int(EscherPropertyId::BoundsLeft)? as i64,
            self.get_int(EscherPropertyId::BoundsTop)? as i64,
            self.get_int(EscherPropertyId::BoundsRight)? as i64,
            self.get_int(EscherPropertyId::BoundsBottom)? as i64,
        ))
    }

    /// 1-based blip store reference.
    pub fn blip_reference(&self) -> Option<u32> {
        self.get_int(EscherPropertyId::BlipToDisplay)
            .filter(|&pib| pib > 0)
            .map(|pib| pib as u32)
    }

    /// Whether the fill flags explicitly switch the fill off.
    pub fn fill_disabled(&self) -> bool {
        self.get_int(EscherPropertyId::FillStyleBooleans)
            .map(|flags| flags as u32)
            .is_some_and(|flags| flags & FILL_USE_FILLED != 0 && flags & FILL_FILLED == 0)
    }

    /// Packed BGR fill colour, when it is a literal RGB value.
    ///
    /// Scheme and system colour references cannot be resolved without the
    /// master's colour scheme and are skipped.
    pub fn fill_color(&self) -> Option<u32> {
        let value = self.get_int(EscherPropertyId::FillColor)? as u32;
        if value & COLOR_FLAGS_MASK != 0 {
            if value & COLOR_SCHEME_FLAG != 0 {
                log::debug!("Skipping scheme fill colour 0x{:08X}", value);
            }
            return None;
        }
        Some(value)
    }
}
