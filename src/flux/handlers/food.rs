//! Food flows from resource nodes to districts

use crate::core::config::FluxConfig;
use crate::flux::handlers::FluxHandler;
use crate::flux::Flux;
use crate::places::{PlaceRegistry, ResourceKind};
use crate::simulation::events::SimulationEvent;

#[derive(Debug, Clone, Copy, Default)]
pub struct FoodHandler;

impl FluxHandler for FoodHandler {
    /// Load the node's current production, capped so that the district's
    /// supply plus everything in transit does not pass its surplus target
    fn fill(
        &self,
        flux: &mut Flux,
        places: &mut PlaceRegistry,
        config: &FluxConfig,
        _events: &mut Vec<SimulationEvent>,
    ) -> u32 {
        let Some(node) = places.resource_node(&flux.source_id) else {
            return 0;
        };
        let production = node.production();
        if production == 0 {
            return 0;
        }

        let Some(need) = places
            .district(&flux.destination_id)
            .and_then(|district| district.need(ResourceKind::Food))
        else {
            return 0;
        };

        let target = config.target_supply(need.demand);
        let pending = need.supply.saturating_add(flux.content());
        if pending >= target {
            return 0;
        }

        flux.add_content(production.min(target - pending))
    }

    fn deliver(
        &self,
        flux: &mut Flux,
        places: &mut PlaceRegistry,
        events: &mut Vec<SimulationEvent>,
    ) -> u32 {
        let Some(district) = places.district_mut(&flux.destination_id) else {
            return 0;
        };
        let Some(need) = district.need_mut(ResourceKind::Food) else {
            return 0;
        };

        let delivered = need.receive(flux.content());
        if delivered == 0 {
            return 0;
        }
        flux.remove_content(delivered);

        events.push(SimulationEvent::DistrictUpdate {
            district: district.clone(),
        });
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{FluxId, PlaceId, Vertex};
    use crate::flux::FlowKind;
    use crate::places::{District, ResourceNode};

    fn setup(worker_supply: u32) -> (PlaceRegistry, Flux) {
        let config = SimulationConfig::default();
        let mut places = PlaceRegistry::new();

        let mut node = ResourceNode::new(
            PlaceId::from("resource-node-1"),
            Vertex::new(0.0, 0.0),
            ResourceKind::Food,
            &config.places,
            &config.resource,
        );
        node.worker_needs.supply = worker_supply;
        places.register(node);
        places.register(District::new(
            PlaceId::from("district-1"),
            Vertex::new(3000.0, 0.0),
            &config,
        ));

        let flux = Flux::new(
            FluxId::new("flux-1"),
            PlaceId::from("resource-node-1"),
            PlaceId::from("district-1"),
            FlowKind::Food,
            3000.0,
            100,
        );
        (places, flux)
    }

    fn food_supply(places: &PlaceRegistry) -> u32 {
        places
            .district(&PlaceId::from("district-1"))
            .and_then(|d| d.need(ResourceKind::Food))
            .map(|need| need.supply)
            .unwrap()
    }

    #[test]
    fn test_unstaffed_node_produces_nothing() {
        let (mut places, mut flux) = setup(0);
        let filled = FoodHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut Vec::new());
        assert_eq!(filled, 0);
    }

    #[test]
    fn test_fill_targets_demand_plus_surplus() {
        // Full staffing: production 10, demand 10, target 11
        let (mut places, mut flux) = setup(50);
        let config = FluxConfig::default();

        assert_eq!(FoodHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 10);
        assert_eq!(FoodHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 1);
        assert_eq!(FoodHandler.fill(&mut flux, &mut places, &config, &mut Vec::new()), 0);
        assert_eq!(flux.content(), 11);
    }

    #[test]
    fn test_fill_scales_with_staffing() {
        let (mut places, mut flux) = setup(25);
        let filled = FoodHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut Vec::new());
        assert_eq!(filled, 5);
    }

    #[test]
    fn test_fill_emits_no_place_update() {
        let (mut places, mut flux) = setup(50);
        let mut events = Vec::new();
        FoodHandler.fill(&mut flux, &mut places, &FluxConfig::default(), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_deliver_stops_at_demand() {
        let (mut places, mut flux) = setup(50);
        let config = FluxConfig::default();
        FoodHandler.fill(&mut flux, &mut places, &config, &mut Vec::new());
        FoodHandler.fill(&mut flux, &mut places, &config, &mut Vec::new());
        assert_eq!(flux.content(), 11);

        let mut events = Vec::new();
        assert_eq!(FoodHandler.deliver(&mut flux, &mut places, &mut events), 10);
        assert_eq!(food_supply(&places), 10);
        assert_eq!(flux.content(), 1);
        assert!(matches!(events[0], SimulationEvent::DistrictUpdate { .. }));

        // Demand met: the surplus unit stays in transit
        let mut events = Vec::new();
        assert_eq!(FoodHandler.deliver(&mut flux, &mut places, &mut events), 0);
        assert!(events.is_empty());
    }
}
