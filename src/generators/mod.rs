//! Data generators behind the three chart regions.

pub mod congrats_image;
pub mod glyphs;
pub mod pixel_grid;
pub mod scatter;
pub mod time_series;

pub use congrats_image::{CANVAS_SIZE, CongratsImageGenerator, ImageParameters, PlacedText};
pub use glyphs::{BlockGlyphRasterizer, GlyphRasterizer, TextExtent, TrueTypeRasterizer};
pub use pixel_grid::PixelGrid;
pub use scatter::{DEFAULT_POINT_COUNT, ScatterFrame, ScatterGenerator, ScatterPoint};
pub use time_series::{TimeSeries, TimeSeriesPoint};
