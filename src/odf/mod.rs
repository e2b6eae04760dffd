//! OpenDocument (ODF) presentation support.
//!
//! The style table ([`styles`]) and list numbering ([`lists`]) are shared
//! by everything that reads ODF text; the page walk lives in [`odp`].

pub mod lists;
pub mod odp;
pub mod styles;

pub use odp::OdpDeckParser;

