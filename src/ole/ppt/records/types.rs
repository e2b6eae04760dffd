/// Record types of the PowerPoint document stream.
///
/// Covers both the PowerPoint records (1000-6002) and the Office drawing
/// (Escher) records (0xF000 and up) that appear nested inside them. Only the
/// types the decoder acts on are named; everything else is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Document container
    Document,
    /// Document atom (slide size)
    DocumentAtom,
    /// Slide container
    Slide,
    /// Slide atom
    SlideAtom,
    /// Notes container
    Notes,
    /// Environment container
    Environment,
    /// Slide persist atom (starts a slide group in a SlideListWithText)
    SlidePersistAtom,
    /// Main master container
    MainMaster,
    /// Drawing group container (holds the blip store)
    PPDrawingGroup,
    /// Drawing container of a slide
    PPDrawing,
    /// List container
    List,
    /// Reference from a shape to outline text
    OutlineTextRefAtom,
    /// Text type of the following text atom
    TextHeaderAtom,
    /// UTF-16 text
    TextCharsAtom,
    /// Text style runs
    StyleTextPropAtom,
    /// 8-bit text
    TextBytesAtom,
    /// Outline text of all slides
    SlideListWithText,
    /// Current user atom
    CurrentUserAtom,

    /// Drawing group container
    DggContainer,
    /// Blip store container
    BStoreContainer,
    /// Drawing container
    DgContainer,
    /// Shape group container
    SpgrContainer,
    /// Shape container
    SpContainer,
    /// Blip store entry
    Bse,
    /// Shape atom
    Sp,
    /// Shape properties
    Opt,
    /// Client text box
    ClientTextbox,
    /// Child anchor (inside groups)
    ChildAnchor,
    /// Client anchor (slide coordinates)
    ClientAnchor,
    /// Secondary shape properties
    SecondaryOpt,
    /// Tertiary shape properties
    TertiaryOpt,
    /// Any blip record (0xF018-0xF117)
    Blip(u16),

    /// Unknown or unsupported record type
    Unknown(u16),
}

impl RecordType {
    /// Whether records of this type hold child records.
    ///
    /// Containers are usually also flagged by version 0xF in the header.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Document
                | Self::Slide
                | Self::Notes
                | Self::Environment
                | Self::MainMaster
                | Self::PPDrawingGroup
                | Self::PPDrawing
                | Self::List
                | Self::SlideListWithText
                | Self::DggContainer
                | Self::BStoreContainer
                | Self::DgContainer
                | Self::SpgrContainer
                | Self::SpContainer
                | Self::ClientTextbox
        )
    }

    /// Raw type value.
    pub const fn raw(self) -> u16 {
        match self {
            Self::Document => 1000,
            Self::DocumentAtom => 1001,
            Self::Slide => 1006,
            Self::SlideAtom => 1007,
            Self::Notes => 1008,
            Self::Environment => 1010,
            Self::SlidePersistAtom => 1011,
            Self::MainMaster => 1016,
            Self::PPDrawingGroup => 1035,
            Self::PPDrawing => 1036,
            Self::List => 2000,
            Self::OutlineTextRefAtom => 3998,
            Self::TextHeaderAtom => 3999,
            Self::TextCharsAtom => 4000,
            Self::StyleTextPropAtom => 4001,
            Self::TextBytesAtom => 4008,
            Self::SlideListWithText => 4080,
            Self::CurrentUserAtom => 4086,
            Self::DggContainer => 0xF000,
            Self::BStoreContainer => 0xF001,
            Self::DgContainer => 0xF002,
            Self::SpgrContainer => 0xF003,
            Self::SpContainer => 0xF004,
            Self::Bse => 0xF007,
            Self::Sp => 0xF00A,
            Self::Opt => 0xF00B,
            Self::ClientTextbox => 0xF00D,
            Self::ChildAnchor => 0xF00F,
            Self::ClientAnchor => 0xF010,
            Self::SecondaryOpt => 0xF121,
            Self::TertiaryOpt => 0xF122,
            Self::Blip(raw) | Self::Unknown(raw) => raw,
        }
    }
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        match value {
            1000 => Self::Document,
            1001 => Self::DocumentAtom,
            1006 => Self::Slide,
            1007 => Self::SlideAtom,
            1008 => Self::Notes,
            1010 => Self::Environment,
            1011 => Self::SlidePersistAtom,
            1016 => Self::MainMaster,
            1035 => Self::PPDrawingGroup,
            1036 => Self::PPDrawing,
            2000 => Self::List,
            3998 => Self::OutlineTextRefAtom,
            3999 => Self::TextHeaderAtom,
            4000 => Self::TextCharsAtom,
            4001 => Self::StyleTextPropAtom,
            4008 => Self::TextBytesAtom,
            4080 => Self::SlideListWithText,
            4086 => Self::CurrentUserAtom,
            0xF000 => Self::DggContainer,
            0xF001 => Self::BStoreContainer,
            0xF002 => Self::DgContainer,
            0xF003 => Self::SpgrContainer,
            0xF004 => Self::SpContainer,
            0xF007 => Self::Bse,
            0xF00A => Self::Sp,
            0xF00B => Self::Opt,
            0xF00D => Self::ClientTextbox,
            0xF00F => Self::ChildAnchor,
            0xF010 => Self::ClientAnchor,
            0xF121 => Self::SecondaryOpt,
            0xF122 => Self::TertiaryOpt,
            0xF018..=0xF117 => Self::Blip(value),
            other => Self::Unknown(other),
        }
    }
}

impl From<RecordType> for u16 {
    fn from(record_type: RecordType) -> Self {
        record_type.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip() {
        for raw in [1000u16, 1006, 4000, 4008, 0xF004, 0xF010, 0xF01D, 0x1234] {
            assert_eq!(RecordType::from(raw).raw(), raw);
        }
    }

    #[test]
    fn test_container_types() {
        assert!(RecordType::from(1036).is_container());
        assert!(!RecordType::from(4000).is_container());
        assert!(!RecordType::Unknown(7).is_container());
    }
}
