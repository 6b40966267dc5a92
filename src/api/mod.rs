mod axis_ticks;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod ingest;
mod interaction_controller;
mod invalidation;
mod polling;
mod render_frame_builder;
mod render_style;
mod series_controller;
mod validation;
mod viewport_controller;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
pub use ingest::{DataSource, RecordAdapter};
pub use invalidation::{RedrawPolicy, RenderOutcome};
pub use polling::{FetchOutcome, FetchStatus, FetchTicket, PollReport};
pub use render_style::RenderStyle;
