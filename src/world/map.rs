//! Procedural placement of resource nodes on an empty map

use rand::Rng;
use tracing::{debug, info};

use crate::core::config::SimulationConfig;
use crate::core::types::{world_coord, IdSequence, PlaceId, Vertex};
use crate::places::{ResourceKind, ResourceNode};

#[derive(Debug, Clone)]
pub struct MapGenerator {
    ids: IdSequence,
}

impl Default for MapGenerator {
    fn default() -> Self {
        Self {
            ids: IdSequence::new("resource-node"),
        }
    }
}

impl MapGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter `map.resource_node_count` food nodes over the map
    ///
    /// Positions are whole meters. Each node retries up to
    /// `max_placement_attempts` times to keep `resource_node_spacing` from
    /// every earlier node; the last candidate is kept if none qualifies.
    pub fn generate_resource_nodes<R: Rng + ?Sized>(
        &mut self,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Vec<ResourceNode> {
        let map = &config.map;
        let mut positions: Vec<Vertex> = Vec::with_capacity(map.resource_node_count);

        for _ in 0..map.resource_node_count {
            let mut attempts = 0;
            let position = loop {
                let candidate = world_coord(
                    rng.gen_range(0.0..=map.width),
                    rng.gen_range(0.0..=map.height),
                );
                attempts += 1;

                let crowded = positions
                    .iter()
                    .any(|p| p.distance(candidate).round() < map.resource_node_spacing);
                if !crowded || attempts >= map.max_placement_attempts {
                    if crowded {
                        debug!("Placing node at {:?} despite spacing after {} attempts", candidate, attempts);
                    }
                    break candidate;
                }
            };
            positions.push(position);
        }

        let nodes: Vec<ResourceNode> = positions
            .into_iter()
            .map(|position| {
                ResourceNode::new(
                    PlaceId::new(self.ids.next_id()),
                    position,
                    ResourceKind::Food,
                    &config.places,
                    &config.resource,
                )
            })
            .collect();

        info!("Generated {} resource nodes", nodes.len());
        nodes
    }
}
