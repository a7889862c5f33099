//! congrats-dash: a celebratory single-page dashboard.
//!
//! Three independent generators feed the page: a congratulations card
//! rasterized from a TrueType font, a confetti scatter refreshed by a
//! fixed-period timer, and a downloads line chart loaded once from a
//! double-encoded JSON file. Charts are materialized as backend-agnostic
//! render frames and served as SVG/PNG payloads over HTTP.

pub mod charts;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod generators;
pub mod render;
pub mod server;
pub mod telemetry;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashEvent};
pub use error::{DashError, DashResult};
