use std::fmt::Write as _;

use crate::error::{DashError, DashResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// Output is a pure function of the frame: equal frames produce byte-identical
/// documents.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    font_family: String,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            font_family: "\"Open Sans\", verdana, arial, sans-serif".to_owned(),
            last_stats: SvgRenderStats::default(),
        }
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(&self, frame: &RenderFrame, out: &mut String) -> Result<SvgRenderStats, std::fmt::Error> {
        let mut stats = SvgRenderStats::default();
        let width = frame.viewport.width;
        let height = frame.viewport.height;

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            out,
            r#"<rect x="0" y="0" width="{width}" height="{height}" {}/>"#,
            fill_attrs(frame.background)
        )?;

        for rect in &frame.rects {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" {}"#,
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height),
                fill_attrs(rect.fill_color)
            )?;
            if rect.border_width > 0.0 {
                write!(
                    out,
                    r#" stroke-width="{}" {}"#,
                    num(rect.border_width),
                    stroke_attrs(rect.border_color)
                )?;
            }
            out.push_str("/>\n");
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}" {}/>"#,
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2),
                num(line.stroke_width),
                stroke_attrs(line.color)
            )?;
            stats.lines_drawn += 1;
        }

        for circle in &frame.circles {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" {}"#,
                num(circle.cx),
                num(circle.cy),
                num(circle.radius),
                fill_attrs(circle.fill_color)
            )?;
            if circle.stroke_width > 0.0 {
                write!(
                    out,
                    r#" stroke-width="{}" {}"#,
                    num(circle.stroke_width),
                    stroke_attrs(circle.stroke_color)
                )?;
            }
            out.push_str("/>\n");
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            write!(
                out,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="{anchor}" {}"#,
                num(text.x),
                num(text.y),
                escape(&self.font_family),
                num(text.font_size_px),
                fill_attrs(text.color)
            )?;
            if text.rotation_deg != 0.0 {
                write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    num(text.rotation_deg),
                    num(text.x),
                    num(text.y)
                )?;
            }
            writeln!(out, ">{}</text>", escape(&text.text))?;
            stats.texts_drawn += 1;
        }

        out.push_str("</svg>\n");
        Ok(stats)
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, frame: &RenderFrame) -> DashResult<String> {
        frame.validate()?;

        let mut out = String::with_capacity(256 + 96 * frame.circles.len());
        let stats = self
            .write_document(frame, &mut out)
            .map_err(|err| DashError::InvalidData(format!("svg serialization failed: {err}")))?;
        self.last_stats = stats;
        Ok(out)
    }
}

fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

fn fill_attrs(color: Color) -> String {
    if color.alpha < 1.0 {
        format!(r#"fill="{}" fill-opacity="{}""#, color.to_hex(), num(color.alpha))
    } else {
        format!(r#"fill="{}""#, color.to_hex())
    }
}

fn stroke_attrs(color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            r#"stroke="{}" stroke-opacity="{}""#,
            color.to_hex(),
            num(color.alpha)
        )
    } else {
        format!(r#"stroke="{}""#, color.to_hex())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape, num};

    #[test]
    fn numbers_are_trimmed_to_two_decimals() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(12.345_6), "12.35");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
