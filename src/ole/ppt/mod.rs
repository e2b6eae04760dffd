/// PowerPoint (.ppt) presentation support.
///
/// This module decodes Microsoft PowerPoint presentations in the legacy
/// binary format (.ppt files), which uses OLE2 structured storage.
///
/// # Architecture
///
/// - `records`: record headers and a bounded cursor over the record tree
/// - `escher`: drawing-layer atoms (shape type, properties, anchors)
/// - `text`: text atoms, outline text and the title/body fallback
/// - `parsers`: the document pass and the per-slide shape pass
/// - `package`: [`PptDeckParser`], tying the passes to the compound file
///
/// # PPT File Structure
///
/// A .ppt file is an OLE2 structured storage containing several streams:
/// - **PowerPoint Document**: the record stream holding slides and text
/// - **Current User**: pointer to the latest edit
/// - **Pictures**: embedded pictures as blip records
///
/// # Example
///
/// ```rust,no_run
/// use deckread::{DecodeOptions, DeckParser, Shape};
/// use deckread::ole::ppt::PptDeckParser;
///
/// let bytes = std::fs::read("presentation.ppt")?;
/// let slides = PptDeckParser.parse(&bytes, &DecodeOptions::default())?;
///
/// for slide in &slides {
///     for shape in &slide.shapes {
///         match shape {
///             Shape::Text { text, .. } => println!("Text: {}", text.text()),
///             Shape::Image { image, .. } => println!("Picture: {}", image.mime),
///             _ => {}
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
// Core modules
pub mod package;

// Submodules (organized by functionality)
pub mod current_user;
pub mod escher;
pub mod parsers;
pub mod records;
pub mod text;

// Re-export main types for convenience
pub use current_user::CurrentUser;
pub use package::{PptDeckParser, PptStreams};
pub use records::{Record, RecordCursor, RecordHeader, RecordType};
