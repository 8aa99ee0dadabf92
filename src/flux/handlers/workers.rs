//! Workers flow from districts to resource nodes and into local jobs

use crate::core::config::FluxConfig;
use crate::flux::handlers::FluxHandler;
use crate::flux::Flux;
use crate::places::{Place, PlaceRegistry};
use crate::simulation::events::SimulationEvent;

/// Handles both commuting fluxes (district → node) and local-jobs self-fluxes
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerHandler;

impl FluxHandler for WorkerHandler {
    fn fill(
        &self,
        flux: &mut Flux,
        places: &mut PlaceRegistry,
        config: &FluxConfig,
        events: &mut Vec<SimulationEvent>,
    ) -> u32 {
        let Some(available) = places
            .district(&flux.source_id)
            .map(|district| district.population.workers.available())
        else {
            return 0;
        };
        if available == 0 {
            return 0;
        }

        let pending = |supply: u32| supply.saturating_add(flux.content());
        let (room, rate) = match places.get(&flux.destination_id) {
            Some(Place::ResourceNode(node)) => {
                let target = config.target_supply(node.worker_needs.demand);
                (
                    target.saturating_sub(pending(node.worker_needs.supply)),
                    config.external_worker_rate,
                )
            }
            // Local jobs are filled to demand with no surplus
            Some(Place::District(district)) => (
                district
                    .jobs
                    .workers
                    .demand
                    .saturating_sub(pending(district.jobs.workers.supply)),
                config.local_worker_rate,
            ),
            None => return 0,
        };

        let flow_rate = (flux.capacity as f64 * rate).floor() as u32;
        let to_add = flow_rate.min(available).min(room);
        let added = flux.add_content(to_add);
        if added == 0 {
            return 0;
        }

        if let Some(district) = places.district_mut(&flux.source_id) {
            district.population.workers.commit(added);
            events.push(SimulationEvent::DistrictUpdate {
                district: district.clone(),
            });
        }
        added
    }

    fn deliver(
        &self,
        flux: &mut Flux,
        places: &mut PlaceRegistry,
        events: &mut Vec<SimulationEvent>,
    ) -> u32 {
        let delivered = match places.get_mut(&flux.destination_id) {
            Some(Place::ResourceNode(node)) => {
                let delivered = node.worker_needs.receive(flux.content());
                if delivered > 0 {
                    events.push(SimulationEvent::ResourceNodeUpdate {
                        resource_node: node.clone(),
                    });
                }
                delivered
            }
            Some(Place::District(district)) => {
                let delivered = district.jobs.workers.receive(flux.content());
                if delivered > 0 {
                    events.push(SimulationEvent::DistrictUpdate {
                        district: district.clone(),
                    });
                }
                delivered
            }
            None => 0,
        };

        flux.remove_content(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{FluxId, PlaceId, Vertex};
    use crate::flux::FlowKind;
    use crate::places::{District, ResourceKind, ResourceNode};

    fn places() -> PlaceRegistry {
        let config = SimulationConfig::default();
        let mut places = PlaceRegistry::new();
        places.register(ResourceNode::new(
            PlaceId::from("resource-node-1"),
            Vertex::new(0.0, 0.0),
            ResourceKind::Food,
            &config.places,
            &config.resource,
        ));
        places.register(District::new(
            PlaceId::from("district-1"),
            Vertex::new(3000.0, 0.0),
            &config,
        ));
        places
    }

    fn commute() -> Flux {
        Flux::new(
            FluxId::new("flux-1"),
            PlaceId::from("district-1"),
            PlaceId::from("resource-node-1"),
            FlowKind::Workers,
            3000.0,
            50,
        )
    }

    fn local_jobs() -> Flux {
        Flux::new(
            FluxId::new("flux-2"),
            PlaceId::from("district-1"),
            PlaceId::from("district-1"),
            FlowKind::LocalJobs,
            0.0,
            50,
        )
    }

    fn busy_workers(places: &PlaceRegistry) -> u32 {
        places
            .district(&PlaceId::from("district-1"))
            .map(|d| d.population.workers.busy)
            .unwrap()
    }

    #[test]
    fn test_commute_fill_rate_is_ten_percent() {
        let mut places = places();
        let mut flux = commute();
        let mut events = Vec::new();

        let added = WorkerHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut events);
        assert_eq!(added, 5);
        assert_eq!(busy_workers(&places), 5);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SimulationEvent::DistrictUpdate { .. }));
    }

    #[test]
    fn test_local_jobs_fill_rate_is_twenty_percent() {
        let mut places = places();
        let mut flux = local_jobs();
        let added = WorkerHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut Vec::new());
        assert_eq!(added, 10);
    }

    #[test]
    fn test_local_jobs_stop_at_demand_without_surplus() {
        let mut places = places();
        let mut flux = local_jobs();
        let config = FluxConfig::default();

        // Demand 20: two fills of 10, then nothing
        assert_eq!(WorkerHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 10);
        assert_eq!(WorkerHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 10);
        assert_eq!(WorkerHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 0);

        assert_eq!(WorkerHandler.deliver(&mut flux, &mut places, &mut Vec::new()), 20);
        let jobs = places.district(&PlaceId::from("district-1")).unwrap().jobs.workers;
        assert_eq!(jobs.supply, 20);
        assert_eq!(WorkerHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 0);
    }

    #[test]
    fn test_commute_fills_to_target_with_surplus() {
        let mut places = places();
        let mut flux = commute();
        let config = FluxConfig::default();

        // Node demand 50, target 55; 5 per tick
        let mut total = 0;
        for _ in 0..20 {
            total += WorkerHandler.fill(&mut flux, &mut places, &config, &mut Vec::new());
        }
        assert_eq!(total, 50);
        assert_eq!(flux.content(), 50);

        // Flux is full at capacity 50 even though target is 55
        assert!(!flux.has_capacity());
    }

    #[test]
    fn test_deliver_to_node_emits_node_update() {
        let mut places = places();
        let mut flux = commute();
        WorkerHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut Vec::new());

        let mut events = Vec::new();
        assert_eq!(WorkerHandler.deliver(&mut flux, &mut places, &mut events), 5);
        assert!(matches!(events[0], SimulationEvent::ResourceNodeUpdate { .. }));
        let node = places.resource_node(&PlaceId::from("resource-node-1")).unwrap();
        assert_eq!(node.worker_needs.supply, 5);
    }

    #[test]
    fn test_no_available_workers() {
        let mut places = places();
        if let Some(d) = places.district_mut(&PlaceId::from("district-1")) {
            let current = d.population.workers.current;
            d.population.workers.commit(current);
        }
        let mut flux = commute();
        let added = WorkerHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut Vec::new());
        assert_eq!(added, 0);
    }

    #[test]
    fn test_source_that_is_not_a_district() {
        let mut places = places();
        let mut flux = commute();
        flux.source_id = PlaceId::from("resource-node-1");
        let added = WorkerHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut Vec::new());
        assert_eq!(added, 0);
    }
}
