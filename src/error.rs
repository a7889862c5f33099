use std::path::PathBuf;

use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to read data file `{path}`: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {layer} JSON layer in `{path}`: {source}")]
    DataEncoding {
        path: PathBuf,
        layer: DecodeLayer,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load font `{path}`: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    #[error("failed to encode image: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("unknown event source `{0}`")]
    UnknownEventSource(String),

    #[error("unknown chart `{0}`")]
    UnknownChart(String),

    #[error("slider `{slider}` value {value} outside [{min}, {max}] step {step}")]
    SliderOutOfRange {
        slider: String,
        value: i64,
        min: u32,
        max: u32,
        step: u32,
    },

    #[error("event `{0}` requires a value")]
    MissingEventValue(String),

    #[error("dashboard state lock was poisoned")]
    StatePoisoned,

    #[error("server i/o failed: {0}")]
    Server(#[from] std::io::Error),
}

/// Which of the two sequential JSON decodes of the data file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeLayer {
    Outer,
    Inner,
}

impl std::fmt::Display for DecodeLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outer => f.write_str("outer"),
            Self::Inner => f.write_str("inner"),
        }
    }
}
