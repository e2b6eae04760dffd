//! Unified error types for deckread.
use thiserror::Error;

/// Main error type for deckread operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The bytes are not an OLE2 compound file
    #[error("Not a valid OLE2 container")]
    NotOleFile,

    /// Corrupted or malformed file
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),

    /// Mandatory stream or part not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// The file is not a presentation format this crate decodes
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for deckread operations.
pub type Result<T> = std::result::Result<T, Error>;
