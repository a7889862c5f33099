use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashError, DashResult};
use crate::generators::{GlyphRasterizer, PixelGrid, TrueTypeRasterizer};

/// Side length of the square canvas, in pixels.
pub const CANVAS_SIZE: u32 = 1100;

pub const HEADLINE_TEXT: &str = "10";
pub const GREETING_TEXT: &str = "Congratulations";
pub const SIGNATURE_TEXT: &str = "Plotly!";

/// Font sizes picked by the two sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageParameters {
    pub big_font_size: u32,
    pub small_font_size: u32,
}

impl ImageParameters {
    #[must_use]
    pub const fn new(big_font_size: u32, small_font_size: u32) -> Self {
        Self {
            big_font_size,
            small_font_size,
        }
    }
}

impl Default for ImageParameters {
    fn default() -> Self {
        Self::new(600, 80)
    }
}

/// One string placed on the canvas; `(x, y)` is its top-left anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

/// Renders the congratulations card: a big "10" in the upper third and the
/// two-line greeting stacked below the vertical midpoint, white on black.
#[derive(Debug, Clone)]
pub struct CongratsImageGenerator {
    rasterizer: Arc<dyn GlyphRasterizer>,
}

impl CongratsImageGenerator {
    #[must_use]
    pub fn new(rasterizer: Arc<dyn GlyphRasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Loads the TrueType font at `font_path`; a missing or invalid font is fatal.
    pub fn load(font_path: impl AsRef<Path>) -> DashResult<Self> {
        let rasterizer = TrueTypeRasterizer::load(font_path)?;
        Ok(Self::new(Arc::new(rasterizer)))
    }

    /// Positions of the three strings for `params`. Pure text measurement.
    #[must_use]
    pub fn layout(&self, params: ImageParameters) -> [PlacedText; 3] {
        let side = f64::from(CANVAS_SIZE);
        let big = f64::from(params.big_font_size);
        let small = f64::from(params.small_font_size);

        let headline = self.rasterizer.measure(HEADLINE_TEXT, big);
        let greeting = self.rasterizer.measure(GREETING_TEXT, small);
        let signature = self.rasterizer.measure(SIGNATURE_TEXT, small);

        [
            PlacedText {
                text: HEADLINE_TEXT,
                x: (side - headline.width) / 2.0,
                y: (side / 3.0 - headline.height) / 3.0,
                font_size: big,
            },
            PlacedText {
                text: GREETING_TEXT,
                x: (side - greeting.width) / 2.0,
                y: side / 2.0,
                font_size: small,
            },
            PlacedText {
                text: SIGNATURE_TEXT,
                x: (side - signature.width) / 2.0,
                y: side / 2.0 + signature.height,
                font_size: small,
            },
        ]
    }

    /// Draws a fresh `CANVAS_SIZE`² grid. Deterministic for equal inputs.
    pub fn render(&self, params: ImageParameters) -> DashResult<PixelGrid> {
        if params.big_font_size == 0 || params.small_font_size == 0 {
            return Err(DashError::InvalidData(format!(
                "font sizes must be > 0, got {}/{}",
                params.big_font_size, params.small_font_size
            )));
        }
        let mut canvas = PixelGrid::black(CANVAS_SIZE, CANVAS_SIZE)?;
        for placed in self.layout(params) {
            self.rasterizer.draw(
                &mut canvas,
                placed.text,
                placed.x,
                placed.y,
                placed.font_size,
                u8::MAX,
            );
        }
        debug!(
            big_font_size = params.big_font_size,
            small_font_size = params.small_font_size,
            lit_pixels = canvas.lit_pixel_count(),
            "rendered congratulations image"
        );
        Ok(canvas)
    }
}
