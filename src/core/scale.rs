use crate::core::types::PixelSpan;
use crate::error::{DashError, DashResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> DashResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(DashError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Fits a scale around `values` with `padding_ratio` of the span added on
    /// both sides. A single distinct value gets a unit-wide domain around it.
    pub fn fit(values: impl IntoIterator<Item = f64>, padding_ratio: f64) -> DashResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if !value.is_finite() {
                return Err(DashError::InvalidData("value must be finite".to_owned()));
            }
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return Err(DashError::InvalidData(
                "cannot fit a scale to an empty series".to_owned(),
            ));
        }

        if min == max {
            return Self::new(min - 0.5, max + 0.5);
        }
        let padding = (max - min) * padding_ratio.max(0.0);
        Self::new(min - padding, max + padding)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        (lo..=hi).contains(&value)
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> DashResult<f64> {
        if !value.is_finite() {
            return Err(DashError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span.start + normalized * span.length())
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> DashResult<f64> {
        if !pixel.is_finite() {
            return Err(DashError::InvalidData("pixel must be finite".to_owned()));
        }
        if span.length() == 0.0 {
            return Err(DashError::InvalidData(
                "pixel span must be non-empty".to_owned(),
            ));
        }

        let normalized = (pixel - span.start) / span.length();
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round tick values inside the domain, roughly `target_count` of them.
    ///
    /// Steps are picked from the 1/2/5 × 10^k ladder.
    #[must_use]
    pub fn nice_ticks(self, target_count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let target = target_count.max(1) as f64;
        let raw_step = (hi - lo) / target;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let step = if residual <= 1.0 {
            magnitude
        } else if residual <= 2.0 {
            2.0 * magnitude
        } else if residual <= 5.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|index| index as f64 * step).collect()
    }
}
