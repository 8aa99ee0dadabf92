//! Production sites that turn staffed labor into goods

use serde::{Deserialize, Serialize};

use crate::core::config::{PlaceConfig, ResourceDefaults};
use crate::core::types::{world_xy, PlaceId, Vertex};
use crate::places::commodity::Commodity;

/// Kind of good a resource node produces and districts consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Food,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "resourceNode", tag = "placeKind", rename_all = "camelCase")]
pub struct ResourceNode {
    pub id: PlaceId,
    #[serde(flatten, with = "world_xy")]
    pub position: Vertex,
    pub radius: f64,
    pub resource_kind: ResourceKind,
    /// Units per tick at full staffing
    pub throughput: u32,
    pub worker_needs: Commodity,
    /// Units produced at the staffing seen on the last tick
    pub output: u32,
}

impl ResourceNode {
    pub fn new(
        id: PlaceId,
        position: Vertex,
        resource_kind: ResourceKind,
        places: &PlaceConfig,
        defaults: &ResourceDefaults,
    ) -> Self {
        Self {
            id,
            position,
            radius: places.resource_node_radius,
            resource_kind,
            throughput: defaults.throughput,
            worker_needs: Commodity::with_demand(defaults.worker_demand),
            output: 0,
        }
    }

    /// Units produced this tick given current staffing
    ///
    /// Scales linearly with `worker_needs.supply / worker_needs.demand`.
    /// A node that needs no workers always runs at full throughput.
    pub fn production(&self) -> u32 {
        let needs = self.worker_needs;
        if needs.demand == 0 {
            return self.throughput;
        }
        let staffed = needs.supply.min(needs.demand) as u64;
        (self.throughput as u64 * staffed / needs.demand as u64) as u32
    }

    /// Recompute `output`, returns true if it changed
    pub fn refresh_output(&mut self) -> bool {
        let output = self.production();
        let changed = output != self.output;
        self.output = output;
        changed
    }
}
