//! Escher (Office Drawing) records inside the PowerPoint document stream.
//!
//! Slides carry their shapes in a `PPDrawing` container holding an Escher
//! drawing tree: a `DgContainer`, nested `SpgrContainer` groups and one
//! `SpContainer` per shape. Shapes are described by an `Sp` atom (type and
//! flags), one or more `Opt` property tables, an anchor and an optional
//! client text box.

pub mod anchor;
pub mod properties;

pub use anchor::ShapeAnchor;
pub use properties::{EscherProperties, EscherPropertyId, EscherPropertyValue};

use crate::common::binary::read_u32_le;
use crate::ole::ppt::records::Record;

/// Shape is a group.
pub const SP_GROUP: u32 = 0x0001;
/// Shape is the group patriarch (drawing root).
pub const SP_PATRIARCH: u32 = 0x0002;
/// Shape is the slide background.
pub const SP_BACKGROUND: u32 = 0x0400;

/// Preset shape types the decoder maps to a geometry hint.
pub const SHAPE_TYPE_ROUND_RECT: u16 = 2;
pub const SHAPE_TYPE_ELLIPSE: u16 = 3;

/// Contents of an `Sp` atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeAtom {
    /// Preset shape type (record instance)
    pub shape_type: u16,
    pub shape_id: u32,
    pub flags: u32,
}

impl ShapeAtom {
    pub fn parse(sp: &Record) -> Option<Self> {
        Some(Self {
            shape_type: sp.instance(),
            shape_id: read_u32_le(sp.data, 0).ok()?,
            flags: read_u32_le(sp.data, 4).ok()?,
        })
    }

    /// Group and patriarch shapes carry no content of their own.
    #[inline]
    pub fn is_structural(&self) -> bool {
        self.flags & (SP_GROUP | SP_PATRIARCH) != 0
    }

    #[inline]
    pub fn is_background(&self) -> bool {
        self.flags & SP_BACKGROUND != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::ppt::records::RecordCursor;
    use crate::ole::ppt::records::testing::atom;

    #[test]
    fn test_shape_atom() {
        let mut payload = 1025u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&(SP_BACKGROUND | 0x800).to_le_bytes());
        let data = atom(0xF00A, SHAPE_TYPE_ELLIPSE, &payload);
        let sp = RecordCursor::new(&data).next().unwrap();
        let shape = ShapeAtom::parse(&sp).unwrap();
        assert_eq!(shape.shape_type, SHAPE_TYPE_ELLIPSE);
        assert_eq!(shape.shape_id, 1025);
        assert!(shape.is_background());
        assert!(!shape.is_structural());
    }
}
