use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{DashError, DashResult};
use crate::generators::DEFAULT_POINT_COUNT;

pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub const DEFAULT_DATA_PATH: &str = "./data/data.json";
pub const DEFAULT_BACKGROUND_URL: &str = "https://media.giphy.com/media/MViYNpI0wx69zX7j7w/giphy.gif";
pub const DEFAULT_FOOTER_TEXT: &str =
    "Best wishes from Danny Bharat and the team at Arkimetrix Analytics";

/// Range, step and default of one slider control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub id: String,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
    /// Distance between unlabeled marks along the track.
    pub mark_step: u32,
}

impl SliderSpec {
    #[must_use]
    pub fn big_font() -> Self {
        Self {
            id: "size-big".to_owned(),
            min: 100,
            max: 1000,
            step: 10,
            default: 600,
            mark_step: 100,
        }
    }

    #[must_use]
    pub fn small_font() -> Self {
        Self {
            id: "size-small".to_owned(),
            min: 50,
            max: 200,
            step: 10,
            default: 80,
            mark_step: 50,
        }
    }

    /// Mark positions from `min` to `max` inclusive.
    #[must_use]
    pub fn marks(&self) -> Vec<u32> {
        if self.mark_step == 0 {
            return Vec::new();
        }
        (self.min..=self.max)
            .step_by(self.mark_step as usize)
            .collect()
    }

    /// Accepts `value` only when the control itself could produce it.
    pub fn check(&self, value: i64) -> DashResult<u32> {
        let rejected = || DashError::SliderOutOfRange {
            slider: self.id.clone(),
            value,
            min: self.min,
            max: self.max,
            step: self.step,
        };

        let value_u32 = u32::try_from(value).map_err(|_| rejected())?;
        if value_u32 < self.min || value_u32 > self.max {
            return Err(rejected());
        }
        // In range, so the offset cannot underflow.
        if self.step != 0 && (value_u32 - self.min) % self.step != 0 {
            return Err(rejected());
        }
        Ok(value_u32)
    }

    fn validate(&self) -> DashResult<()> {
        if self.id.is_empty() {
            return Err(DashError::Config("slider id must not be empty".to_owned()));
        }
        if self.min > self.max {
            return Err(DashError::Config(format!(
                "slider `{}` has min {} > max {}",
                self.id, self.min, self.max
            )));
        }
        if self.step == 0 {
            return Err(DashError::Config(format!(
                "slider `{}` step must be > 0",
                self.id
            )));
        }
        self.check(i64::from(self.default)).map_err(|_| {
            DashError::Config(format!(
                "slider `{}` default {} is not a reachable value",
                self.id, self.default
            ))
        })?;
        Ok(())
    }
}

/// Process configuration. Every field has a default, so an empty JSON object
/// is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind_address: String,
    pub data_path: PathBuf,
    pub font_path: PathBuf,
    pub tick_interval_ms: u64,
    pub scatter_point_count: usize,
    pub background_image_url: String,
    pub footer_text: String,
    pub big_slider: SliderSpec,
    pub small_slider: SliderSpec,
    pub scatter_viewport: Viewport,
    pub line_viewport: Viewport,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8050".to_owned(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            tick_interval_ms: 1_000,
            scatter_point_count: DEFAULT_POINT_COUNT,
            background_image_url: DEFAULT_BACKGROUND_URL.to_owned(),
            footer_text: DEFAULT_FOOTER_TEXT.to_owned(),
            big_slider: SliderSpec::big_font(),
            small_slider: SliderSpec::small_font(),
            scatter_viewport: Viewport::new(700, 450),
            line_viewport: Viewport::new(700, 450),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            DashError::Config(format!("failed to read `{}`: {err}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|err| {
            DashError::Config(format!("failed to parse `{}`: {err}", path.display()))
        })?;
        config.validate()
    }

    pub fn validate(self) -> DashResult<Self> {
        if self.tick_interval_ms == 0 {
            return Err(DashError::Config("tick_interval_ms must be > 0".to_owned()));
        }
        if self.scatter_point_count == 0 {
            return Err(DashError::Config(
                "scatter_point_count must be > 0".to_owned(),
            ));
        }
        if self.big_slider.id == self.small_slider.id {
            return Err(DashError::Config(format!(
                "slider ids must differ, both are `{}`",
                self.big_slider.id
            )));
        }
        self.big_slider.validate()?;
        self.small_slider.validate()?;
        for viewport in [self.scatter_viewport, self.line_viewport] {
            viewport.ensure_valid()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{DashboardConfig, SliderSpec};
    use crate::error::DashError;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "congrats-dash-config-{}-{name}",
            std::process::id()
        ));
        fs::write(&path, contents).expect("write scratch config");
        path
    }

    #[test]
    fn default_sliders_match_the_page_controls() {
        let big = SliderSpec::big_font();
        assert_eq!(big.marks(), vec![100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]);
        assert_eq!(SliderSpec::small_font().marks(), vec![50, 100, 150, 200]);
        assert_eq!(big.check(600).expect("default"), 600);
        assert!(big.check(605).is_err());
        assert!(big.check(1010).is_err());
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let config: DashboardConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(config, DashboardConfig::default());
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = DashboardConfig {
            tick_interval_ms: 0,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn extreme_values_are_rejected_without_overflow() {
        let big = SliderSpec::big_font();
        for value in [i64::MIN, i64::MAX, -1, i64::from(u32::MAX) + 100] {
            assert!(matches!(
                big.check(value),
                Err(DashError::SliderOutOfRange { .. })
            ));
        }
        assert_eq!(big.check(1000).expect("max"), 1000);
        assert_eq!(big.check(100).expect("min"), 100);
    }

    #[test]
    fn load_reads_partial_config_from_disk() {
        let path = scratch_file(
            "partial.json",
            r#"{"bind_address": "0.0.0.0:9000", "tick_interval_ms": 250}"#,
        );
        let config = DashboardConfig::load(&path).expect("load");
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.big_slider, SliderSpec::big_font());
    }

    #[test]
    fn load_rejects_malformed_and_missing_files() {
        let path = scratch_file("malformed.json", "{ \"tick_interval_ms\": ");
        let err = DashboardConfig::load(&path).expect_err("malformed");
        fs::remove_file(&path).expect("cleanup");
        assert!(matches!(err, DashError::Config(ref message) if message.contains("parse")));

        let err = DashboardConfig::load("/no/such/dashboard.json").expect_err("missing");
        assert!(matches!(err, DashError::Config(ref message) if message.contains("read")));
    }

    #[test]
    fn load_validates_what_it_reads() {
        let path = scratch_file("zero_points.json", r#"{"scatter_point_count": 0}"#);
        let err = DashboardConfig::load(&path).expect_err("invalid");
        fs::remove_file(&path).expect("cleanup");
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn duplicate_slider_ids_are_rejected() {
        let mut small = SliderSpec::small_font();
        small.id = "size-big".to_owned();
        let config = DashboardConfig {
            small_slider: small,
            ..DashboardConfig::default()
        };
        let err = config.validate().expect_err("duplicate ids");
        assert!(err.to_string().contains("size-big"));
    }

    #[test]
    fn inconsistent_slider_specs_are_rejected() {
        let inverted = SliderSpec {
            min: 500,
            max: 100,
            ..SliderSpec::big_font()
        };
        let off_step_default = SliderSpec {
            default: 605,
            ..SliderSpec::big_font()
        };
        let zero_step = SliderSpec {
            step: 0,
            ..SliderSpec::small_font()
        };
        let empty_id = SliderSpec {
            id: String::new(),
            ..SliderSpec::small_font()
        };

        for (big, small) in [
            (inverted, SliderSpec::small_font()),
            (off_step_default, SliderSpec::small_font()),
            (SliderSpec::big_font(), zero_step),
            (SliderSpec::big_font(), empty_id),
        ] {
            let config = DashboardConfig {
                big_slider: big,
                small_slider: small,
                ..DashboardConfig::default()
            };
            assert!(matches!(config.validate(), Err(DashError::Config(_))));
        }
    }
}
