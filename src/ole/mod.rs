/// OLE2 compound file access
mod file;

/// Legacy PowerPoint presentation (.ppt) reader
///
/// This module decodes Microsoft PowerPoint presentations in the legacy
/// binary format (.ppt files), which are OLE2-based files.
pub mod ppt;

// Re-export public types for convenient access
pub use file::{OleFile, is_ole_file};
