use crate::error::DashResult;
use crate::generators::{CongratsImageGenerator, ImageParameters, PixelGrid};

/// The congratulations card shown as a gray-scale image without ticks or
/// color bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageChart {
    pub params: ImageParameters,
    pub grid: PixelGrid,
}

impl ImageChart {
    pub fn render(generator: &CongratsImageGenerator, params: ImageParameters) -> DashResult<Self> {
        Ok(Self {
            params,
            grid: generator.render(params)?,
        })
    }

    /// Gray-scale PNG of the grid; black stays black and white stays white.
    pub fn to_png(&self) -> DashResult<Vec<u8>> {
        self.grid.to_png()
    }
}
