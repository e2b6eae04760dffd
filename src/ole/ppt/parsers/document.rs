/// Document-level pass over the `PowerPoint Document` stream.
///
/// Reads what every slide shares: the slide size, the outline text of each
/// slide and the blip store. Missing pieces fall back to defaults.
use crate::common::binary::read_i32_le;
use crate::common::unit::{emu_to_px, ppt_master_to_emu};
use crate::images::BlipStoreEntry;
use crate::images::blip::parse_blip_store;
use crate::ole::ppt::records::{Record, RecordType};
use crate::ole::ppt::text::collect_slide_texts;
use crate::presentation::SlideSize;

/// 10in x 7.5in in EMU.
pub const DEFAULT_SLIDE_SIZE_EMU: (i64, i64) = (9_144_000, 6_858_000);

/// Sizes below this are master units rather than EMU.
const MASTER_UNIT_THRESHOLD: i64 = 100_000;

/// `SlideListWithText` instance holding slide (not master or notes) text.
const SLWT_INSTANCE_SLIDES: u16 = 0;

/// Shared document information.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Slide size in EMU
    pub slide_size_emu: Option<(i64, i64)>,
    /// Outline text per slide, in slide order
    pub slide_texts: Vec<Vec<String>>,
    pub blip_store: Vec<Option<BlipStoreEntry>>,
}

impl DocumentInfo {
    /// Read the `Document` container.
    pub fn from_document(document: &Record) -> Self {
        let mut info = Self {
            slide_size_emu: document
                .find_descendant(RecordType::DocumentAtom)
                .and_then(|atom| parse_slide_size(&atom)),
            ..Default::default()
        };

        for child in document.children() {
            match child.record_type() {
                RecordType::SlideListWithText if child.instance() == SLWT_INSTANCE_SLIDES => {
                    info.slide_texts.extend(collect_slide_texts(&child));
                },
                RecordType::PPDrawingGroup => {
                    if let Some(bstore) = child.find_descendant(RecordType::BStoreContainer) {
                        info.blip_store = parse_blip_store(bstore.data);
                    }
                },
                _ => {},
            }
        }

        log::debug!(
            "Document: size {:?}, {} outline groups, {} blip store entries",
            info.slide_size_emu,
            info.slide_texts.len(),
            info.blip_store.len()
        );
        info
    }

    /// Slide size in pixels.
    pub fn slide_size(&self) -> SlideSize {
        let (w, h) = self.slide_size_emu.unwrap_or(DEFAULT_SLIDE_SIZE_EMU);
        SlideSize::new(emu_to_px(w), emu_to_px(h))
    }

    /// Outline text of slide `index`.
    pub fn texts_for(&self, index: usize) -> &[String] {
        self.slide_texts.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Slide size from a `DocumentAtom`, converted to EMU.
fn parse_slide_size(atom: &Record) -> Option<(i64, i64)> {
    let width = read_i32_le(atom.data, 0).ok()? as i64;
    let height = read_i32_le(atom.data, 4).ok()? as i64;
    if width <= 0 || height <= 0 {
        log::debug!("Ignoring slide size {}x{}", width, height);
        return None;
    }
    if width < MASTER_UNIT_THRESHOLD {
        Some((ppt_master_to_emu(width), ppt_master_to_emu(height)))
    } else {
        Some((width, height))
    }
}
