pub mod score;
pub mod source_pattern;
pub mod svg_geometry;

pub use score::{PageGeometry, PageImageSource, PageSize, ScoreSources};
pub use source_pattern::{filter_recognized, is_recognized};
pub use svg_geometry::{DeclaredSize, SvgMarkup};
