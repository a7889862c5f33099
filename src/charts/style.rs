use crate::core::Viewport;
use crate::render::Color;

/// Near-black used for both paper and plot backgrounds (`#010001`).
pub const DASH_BACKGROUND: Color = Color::rgb(1.0 / 255.0, 0.0, 1.0 / 255.0);

/// Marker outline color, DarkSlateGrey (`#2F4F4F`).
pub const DARK_SLATE_GREY: Color = Color::rgb(47.0 / 255.0, 79.0 / 255.0, 79.0 / 255.0);

/// First color of the default qualitative palette (`#636EFA`).
pub const SERIES_BLUE: Color = Color::rgb(99.0 / 255.0, 110.0 / 255.0, 250.0 / 255.0);

/// Look shared by every chart region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub paper_background: Color,
    pub plot_background: Color,
    pub font_color: Color,
    pub grid_color: Color,
    pub zero_line_color: Color,
    pub tick_font_size_px: f64,
    pub title_font_size_px: f64,
    pub viewport: Viewport,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            paper_background: DASH_BACKGROUND,
            plot_background: DASH_BACKGROUND,
            font_color: Color::WHITE,
            grid_color: Color::rgba(1.0, 1.0, 1.0, 0.12),
            zero_line_color: Color::rgba(1.0, 1.0, 1.0, 0.3),
            tick_font_size_px: 12.0,
            title_font_size_px: 14.0,
            viewport: Viewport::new(700, 450),
        }
    }
}

impl ChartTheme {
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}
