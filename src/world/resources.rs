//! Resource node loading, output refresh and queries

use tracing::{debug, warn};

use crate::core::types::PlaceId;
use crate::places::{PlaceKind, PlaceRegistry, ResourceNode};
use crate::simulation::events::SimulationEvent;

#[derive(Debug, Clone, Default)]
pub struct ResourceNodeManager;

impl ResourceNodeManager {
    pub fn new() -> Self {
        Self
    }

    /// Register nodes, returning their ids in load order
    pub fn load(&self, nodes: Vec<ResourceNode>, places: &mut PlaceRegistry) -> Vec<PlaceId> {
        nodes
            .into_iter()
            .map(|node| {
                let id = node.id.clone();
                if places.register(node).is_some() {
                    warn!("Resource node {} replaced an existing place", id);
                }
                id
            })
            .collect()
    }

    /// Recompute each node's output from its current staffing
    pub fn tick(&self, places: &mut PlaceRegistry, events: &mut Vec<SimulationEvent>) {
        for id in places.ids_of_kind(PlaceKind::ResourceNode) {
            let Some(node) = places.resource_node_mut(&id) else {
                continue;
            };
            if node.refresh_output() {
                debug!("Resource node {} now produces {}", id, node.output);
                events.push(SimulationEvent::ResourceNodeUpdate {
                    resource_node: node.clone(),
                });
            }
        }
    }

    /// Answer a UI query; unknown ids produce no response
    pub fn query(
        &self,
        request_id: String,
        resource_node_id: PlaceId,
        places: &PlaceRegistry,
    ) -> Option<SimulationEvent> {
        let Some(node) = places.resource_node(&resource_node_id) else {
            warn!("Query {} for unknown resource node {}", request_id, resource_node_id);
            return None;
        };
        Some(SimulationEvent::ResourceNodeResponse {
            data: node.clone(),
            request_id,
            resource_node_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Vertex;
    use crate::places::ResourceKind;

    fn node(id: &str) -> ResourceNode {
        let config = SimulationConfig::default();
        ResourceNode::new(
            PlaceId::from(id),
            Vertex::new(0.0, 0.0),
            ResourceKind::Food,
            &config.places,
            &config.resource,
        )
    }

    #[test]
    fn test_load_registers_in_order() {
        let mut places = PlaceRegistry::new();
        let ids = ResourceNodeManager::new().load(vec![node("a"), node("b")], &mut places);
        assert_eq!(ids, vec![PlaceId::from("a"), PlaceId::from("b")]);
        assert_eq!(places.resource_nodes().count(), 2);
    }

    #[test]
    fn test_tick_reports_output_changes_only() {
        let mut places = PlaceRegistry::new();
        let manager = ResourceNodeManager::new();
        manager.load(vec![node("a")], &mut places);

        let mut events = Vec::new();
        manager.tick(&mut places, &mut events);
        assert!(events.is_empty());

        places.resource_node_mut(&PlaceId::from("a")).unwrap().worker_needs.supply = 50;
        manager.tick(&mut places, &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(places.resource_node(&PlaceId::from("a")).unwrap().output, 10);
    }

    #[test]
    fn test_query_known_node() {
        let mut places = PlaceRegistry::new();
        let manager = ResourceNodeManager::new();
        manager.load(vec![node("a")], &mut places);

        match manager.query("r".into(), PlaceId::from("a"), &places) {
            Some(SimulationEvent::ResourceNodeResponse { request_id, data, .. }) => {
                assert_eq!(request_id, "r");
                assert_eq!(data.id.as_str(), "a");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(manager.query("r".into(), PlaceId::from("zz"), &places).is_none());
    }
}
