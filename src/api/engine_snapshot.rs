use serde::Serialize;

use crate::core::{LegendEntry, SurfaceSize, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{FollowState, HoverInfo, InteractionMode};
use crate::render::Renderer;

use super::{ChartEngine, FetchStatus};

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable state snapshot used by regression tests and host debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub surface: SurfaceSize,
    pub viewport: Viewport,
    pub follow: FollowState,
    pub live: bool,
    pub shut_down: bool,
    pub interaction_mode: InteractionMode,
    pub hover: Option<HoverInfo>,
    pub legend: Vec<LegendEntry>,
    pub fetch_status: Vec<FetchStatus>,
    pub frames_rendered: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshotJsonContractV1<'a> {
    pub schema_version: u32,
    pub snapshot: &'a EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            surface: self.core.config.surface,
            viewport: self.core.viewport,
            follow: self.core.follow,
            live: self.core.config.live,
            shut_down: self.core.runtime.shut_down,
            interaction_mode: self.core.interaction.mode(),
            hover: self.core.interaction.hover(),
            legend: self.core.registry.legend(),
            fetch_status: self.fetch_statuses(),
            frames_rendered: self.core.runtime.frames_rendered,
        }
    }
}
