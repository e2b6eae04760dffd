//! Apple iWork packages.
//!
//! iWork documents are ZIP bundles whose object model is stored as
//! Snappy-framed protobuf archives under `Index/`. That model is not
//! decoded here: Keynote decks are read from the slide thumbnails and
//! previews every bundle carries (see [`keynote`]).

pub mod keynote;

pub use keynote::KeynoteDeckParser;
