use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Number of confetti points per frame unless configured otherwise.
pub const DEFAULT_POINT_COUNT: usize = 100;

/// Colors are drawn from `[0, COLOR_SPACE)`, i.e. white itself is never picked.
const COLOR_SPACE: u32 = 0xFF_FFFF;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// `#RRGGBB`, uppercase.
    pub color: String,
}

/// One wholesale batch of confetti.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterFrame {
    pub points: Vec<ScatterPoint>,
}

impl ScatterFrame {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Samples confetti frames: standard-normal coordinates, uniform colors.
#[derive(Debug, Clone)]
pub struct ScatterGenerator {
    rng: StdRng,
}

impl ScatterGenerator {
    /// Generator seeded from the operating system; every frame differs.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible generator for snapshots and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn render_frame(&mut self, point_count: usize) -> ScatterFrame {
        let xs: Vec<f64> = (0..point_count)
            .map(|_| StandardNormal.sample(&mut self.rng))
            .collect();
        let ys: Vec<f64> = (0..point_count)
            .map(|_| StandardNormal.sample(&mut self.rng))
            .collect();

        let points = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| ScatterPoint {
                x,
                y,
                color: format!("#{:06X}", self.rng.random_range(0..COLOR_SPACE)),
            })
            .collect();

        ScatterFrame { points }
    }
}

impl Default for ScatterGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
