//! Shape anchors.
//!
//! Coordinates are in master units (576 per inch). The client anchor comes
//! in two sizes: 8 bytes of `i16` (top, left, right, bottom) or 16 bytes of
//! `i32` in the same order. The child anchor used inside groups is 16 bytes
//! of `i32` (left, top, right, bottom).

use crate::common::binary::{read_i16_le, read_i32_le};
use crate::common::unit::ppt_master_to_emu;
use crate::ole::ppt::records::{Record, RecordType};

/// Shape rectangle in master units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeAnchor {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ShapeAnchor {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Parse a client anchor atom (0xF010).
    pub fn from_client_anchor(anchor: &Record) -> Option<Self> {
        let data = anchor.data;
        if data.len() >= 16 {
            let top = read_i32_le(data, 0).ok()?;
            let left = read_i32_le(data, 4).ok()?;
            let right = read_i32_le(data, 8).ok()?;
            let bottom = read_i32_le(data, 12).ok()?;
            return Some(Self::new(left, top, right, bottom));
        }
        if data.len() >= 8 {
            let top = read_i16_le(data, 0).ok()? as i32;
            let left = read_i16_le(data, 2).ok()? as i32;
            let right = read_i16_le(data, 4).ok()? as i32;
            let bottom = read_i16_le(data, 6).ok()? as i32;
            return Some(Self::new(left, top, right, bottom));
        }
        log::debug!("Client anchor too short: {} bytes", data.len());
        None
    }

    /// Parse a child anchor atom (0xF00F).
    pub fn from_child_anchor(anchor: &Record) -> Option<Self> {
        let data = anchor.data;
        Some(Self::new(
            read_i32_le(data, 0).ok()?,
            read_i32_le(data, 4).ok()?,
            read_i32_le(data, 8).ok()?,
            read_i32_le(data, 12).ok()?,
        ))
    }

    /// The first client or child anchor directly inside a shape container.
    pub fn from_container(container: &Record) -> Option<Self> {
        container.children().find_map(|child| match child.record_type() {
            RecordType::ClientAnchor => Self::from_client_anchor(&child),
            RecordType::ChildAnchor => Self::from_child_anchor(&child),
            _ => None,
        })
    }

    /// Edges converted to EMU as (left, top, right, bottom).
    pub fn to_emu(&self) -> (i64, i64, i64, i64) {
        (
            ppt_master_to_emu(self.left as i64),
            ppt_master_to_emu(self.top as i64),
            ppt_master_to_emu(self.right as i64),
            ppt_master_to_emu(self.bottom as i64),
        )
    }
}
