//! live-chart: headless real-time time-series chart engine.
//!
//! Streamed `(time, value)` observations are merged into deduplicated,
//! time-ordered per-series stores. A pannable, zoomable viewport with an
//! auto-following moving window drives one backend-agnostic `RenderFrame`
//! per tick, with adaptive decimation, overload markers and a hover
//! crosshair.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult, SourceError};
