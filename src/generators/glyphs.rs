use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rusttype::{Font, Scale, point};
use tracing::debug;

use crate::error::{DashError, DashResult};
use crate::generators::PixelGrid;

/// Ink extent of a string drawn with its pen origin at the top-left corner of
/// the ascender line: `width` is the rightmost inked column, `height` the
/// lowest inked row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Measures and draws text onto a `PixelGrid`.
///
/// `font_size` is the em size in pixels. `(x, y)` is the top-left anchor of the
/// ascender line.
pub trait GlyphRasterizer: fmt::Debug + Send + Sync {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent;

    fn draw(&self, canvas: &mut PixelGrid, text: &str, x: f64, y: f64, font_size: f64, intensity: u8);
}

/// TrueType rasterizer backed by `rusttype`.
pub struct TrueTypeRasterizer {
    font: Font<'static>,
    source: Option<PathBuf>,
}

impl fmt::Debug for TrueTypeRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueTypeRasterizer")
            .field("source", &self.source)
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl TrueTypeRasterizer {
    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| DashError::FontLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let mut rasterizer = Self::from_bytes(bytes).map_err(|err| match err {
            DashError::FontLoad { reason, .. } => DashError::FontLoad {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;
        rasterizer.source = Some(path.to_path_buf());
        debug!(path = %path.display(), "loaded truetype font");
        Ok(rasterizer)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> DashResult<Self> {
        let font = Font::try_from_vec(bytes).ok_or_else(|| DashError::FontLoad {
            path: PathBuf::new(),
            reason: "not a valid TrueType/OpenType font".to_owned(),
        })?;
        Ok(Self { font, source: None })
    }

    /// rusttype scales by ascent-to-descent height; convert an em size to that.
    fn scale_for_em(&self, font_size: f64) -> Scale {
        let unscaled = self.font.v_metrics_unscaled();
        let units_per_em = f32::from(self.font.units_per_em().max(1));
        let height = (unscaled.ascent - unscaled.descent) / units_per_em;
        Scale::uniform(font_size as f32 * height)
    }
}

impl GlyphRasterizer for TrueTypeRasterizer {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent {
        let scale = self.scale_for_em(font_size);
        let ascent = self.font.v_metrics(scale).ascent;

        let mut extent = TextExtent::default();
        for glyph in self.font.layout(text, scale, point(0.0, ascent)) {
            if let Some(bounds) = glyph.pixel_bounding_box() {
                extent.width = extent.width.max(f64::from(bounds.max.x));
                extent.height = extent.height.max(f64::from(bounds.max.y));
            }
        }
        extent
    }

    fn draw(&self, canvas: &mut PixelGrid, text: &str, x: f64, y: f64, font_size: f64, intensity: u8) {
        let scale = self.scale_for_em(font_size);
        let ascent = self.font.v_metrics(scale).ascent;
        let origin = point(x as f32, y as f32 + ascent);

        for glyph in self.font.layout(text, scale, origin) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let value = (coverage.clamp(0.0, 1.0) * f32::from(intensity)).round() as u8;
                if value > 0 {
                    canvas.lighten(
                        i64::from(bounds.min.x) + i64::from(gx),
                        i64::from(bounds.min.y) + i64::from(gy),
                        value,
                    );
                }
            });
        }
    }
}

/// Font-free rasterizer that draws every non-space character as a solid block.
///
/// Metrics are fixed fractions of the em size, so layouts are exact and
/// host-independent. Used by tests and headless runs without a font file.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphRasterizer;

impl BlockGlyphRasterizer {
    const ADVANCE: f64 = 0.6;
    const INK_WIDTH: f64 = 0.5;
    const INK_TOP: f64 = 0.2;
    const INK_BOTTOM: f64 = 0.92;
}

impl GlyphRasterizer for BlockGlyphRasterizer {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent {
        let Some(last_inked) = text
            .chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(index, _)| index)
            .last()
        else {
            return TextExtent::default();
        };

        TextExtent {
            width: ((last_inked as f64 * Self::ADVANCE + Self::INK_WIDTH) * font_size).round(),
            height: (Self::INK_BOTTOM * font_size).round(),
        }
    }

    fn draw(&self, canvas: &mut PixelGrid, text: &str, x: f64, y: f64, font_size: f64, intensity: u8) {
        let top = (y + Self::INK_TOP * font_size).round() as i64;
        let bottom = (y + Self::INK_BOTTOM * font_size).round() as i64;
        for (index, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = (x + index as f64 * Self::ADVANCE * font_size).round() as i64;
            let right =
                (x + (index as f64 * Self::ADVANCE + Self::INK_WIDTH) * font_size).round() as i64;
            for py in top..bottom {
                for px in left..right {
                    canvas.lighten(px, py, intensity);
                }
            }
        }
    }
}
