/// Parts of a .pptx package.
///
/// - `presentation`: slide id list and slide size
/// - `slide`: slide, layout and master parts and their inheritance chain
/// - `theme`: colour scheme and theme fonts
/// - `chart`: cached chart series data
pub mod chart;
pub mod presentation;
pub mod slide;
pub mod theme;

pub use chart::chart_data;
pub use presentation::PresentationInfo;
pub use slide::{SlideChain, SlidePart, load_rels};
pub use theme::Theme;
