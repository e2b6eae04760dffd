//! Unified error types for deckread.
//!
//! Only fatal-to-decode conditions surface through this type; recoverable
//! failures inside a stream or package are logged and skipped by the parsers.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
