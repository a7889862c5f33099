pub mod line_series;
pub mod scale;
pub mod types;

pub use line_series::{LineSegment, project_line_segments, project_point};
pub use scale::LinearScale;
pub use types::{DataPoint, Margins, PixelSpan, PlotArea, Viewport};
