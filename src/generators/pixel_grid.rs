use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{DashError, DashResult};

/// Single-channel intensity raster, row-major, 0 = black and 255 = white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// All-black grid.
    pub fn black(width: u32, height: u32) -> DashResult<Self> {
        if width == 0 || height == 0 {
            return Err(DashError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Raises the pixel at (`x`, `y`) to `intensity`; off-canvas writes are clipped.
    pub fn lighten(&mut self, x: i64, y: i64, intensity: u8) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let index = self.index(x as u32, y as u32);
        let pixel = &mut self.data[index];
        *pixel = (*pixel).max(intensity);
    }

    #[must_use]
    pub fn lit_pixel_count(&self) -> usize {
        self.data.iter().filter(|value| **value > 0).count()
    }

    /// Smallest rectangle `(min_x, min_y, max_x, max_y)` covering every lit
    /// pixel, inclusive. `None` for an all-black grid.
    #[must_use]
    pub fn lit_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (index, value) in self.data.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let x = (index % self.width as usize) as u32;
            let y = (index / self.width as usize) as u32;
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        bounds
    }

    /// Encodes the grid as an 8-bit grayscale PNG.
    pub fn to_png(&self) -> DashResult<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            &self.data,
            self.width,
            self.height,
            ExtendedColorType::L8,
        )?;
        Ok(bytes)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::PixelGrid;

    #[test]
    fn lighten_keeps_the_brightest_value_and_clips() {
        let mut grid = PixelGrid::black(4, 3).expect("grid");
        grid.lighten(1, 1, 200);
        grid.lighten(1, 1, 100);
        grid.lighten(-1, 0, 255);
        grid.lighten(4, 0, 255);

        assert_eq!(grid.get(1, 1), Some(200));
        assert_eq!(grid.lit_pixel_count(), 1);
        assert_eq!(grid.lit_bounds(), Some((1, 1, 1, 1)));
    }

    #[test]
    fn png_starts_with_signature() {
        let grid = PixelGrid::black(2, 2).expect("grid");
        let png = grid.to_png().expect("encode");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
