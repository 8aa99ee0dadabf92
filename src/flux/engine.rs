//! Flux creation and the two-phase fill/deliver tick

use ahash::AHashSet;
use tracing::{debug, info, warn};

use crate::core::config::{FluxConfig, PlaceConfig};
use crate::core::types::{FluxId, IdSequence, PlaceId};
use crate::flux::handlers::HandlerRegistry;
use crate::flux::rules::rules_for;
use crate::flux::{FlowKind, Flux};
use crate::places::PlaceRegistry;
use crate::simulation::events::SimulationEvent;

#[derive(Debug)]
pub struct FluxEngine {
    /// Creation order; ticks walk fluxes in this order
    fluxes: Vec<Flux>,
    ids: IdSequence,
    handlers: HandlerRegistry,
    /// Endpoints already reported missing, so each is warned about once
    missing: AHashSet<PlaceId>,
}

impl Default for FluxEngine {
    fn default() -> Self {
        Self::with_handlers(HandlerRegistry::default())
    }
}

impl FluxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handlers(handlers: HandlerRegistry) -> Self {
        Self {
            fluxes: Vec::new(),
            ids: IdSequence::new("flux"),
            handlers,
            missing: AHashSet::new(),
        }
    }

    pub fn fluxes(&self) -> &[Flux] {
        &self.fluxes
    }

    pub fn get(&self, id: &FluxId) -> Option<&Flux> {
        self.fluxes.iter().find(|flux| &flux.id == id)
    }

    pub fn len(&self) -> usize {
        self.fluxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluxes.is_empty()
    }

    /// Places some flux references but the registry no longer holds
    pub fn missing_places(&self) -> &AHashSet<PlaceId> {
        &self.missing
    }

    /// Fluxes touching `place_id` as source or destination
    pub fn fluxes_for(&self, place_id: &PlaceId) -> impl Iterator<Item = &Flux> + '_ {
        let place_id = place_id.clone();
        self.fluxes
            .iter()
            .filter(move |flux| flux.source_id == place_id || flux.destination_id == place_id)
    }

    /// Connect a freshly registered place to itself and its neighbors
    ///
    /// Self rules come first, then every neighbor within the influence
    /// radius (nearest first) gets forward and reverse fluxes. Returns the
    /// number of fluxes created.
    pub fn create_fluxes_for_place(
        &mut self,
        place_id: &PlaceId,
        places: &PlaceRegistry,
        place_config: &PlaceConfig,
        flux_config: &FluxConfig,
        events: &mut Vec<SimulationEvent>,
    ) -> usize {
        let Some(place) = places.get(place_id) else {
            warn!("Cannot create fluxes for {}: place not registered", place_id);
            return 0;
        };
        let kind = place.kind();
        let before = self.fluxes.len();

        for rule in rules_for(kind, kind, true) {
            self.create_flux(place_id, place_id, rule.flow_kind, 0.0, flux_config, events);
        }

        let nearby = places.nearby_places(place_id, place_config.influence_radius);
        if nearby.is_empty() {
            debug!("No places within influence radius of {}", place_id);
        }

        for neighbor in &nearby {
            for rule in rules_for(kind, neighbor.kind, false) {
                self.create_flux(
                    place_id,
                    &neighbor.id,
                    rule.flow_kind,
                    neighbor.distance,
                    flux_config,
                    events,
                );
            }
            for rule in rules_for(neighbor.kind, kind, false) {
                self.create_flux(
                    &neighbor.id,
                    place_id,
                    rule.flow_kind,
                    neighbor.distance,
                    flux_config,
                    events,
                );
            }
        }

        self.fluxes.len() - before
    }

    fn create_flux(
        &mut self,
        source: &PlaceId,
        destination: &PlaceId,
        kind: FlowKind,
        distance: f64,
        config: &FluxConfig,
        events: &mut Vec<SimulationEvent>,
    ) {
        let flux = Flux::new(
            FluxId::new(self.ids.next_id()),
            source.clone(),
            destination.clone(),
            kind,
            distance,
            config.capacity_for(kind),
        );
        info!(
            "Flux {} created: {} -> {} ({:?}, {:.0}m)",
            flux.id, source, destination, kind, distance
        );
        events.push(SimulationEvent::FluxNew { flux: flux.clone() });
        self.fluxes.push(flux);
    }

    /// Run one economy step: fill every flux with room, then deliver every
    /// flux with content
    pub fn tick(
        &mut self,
        places: &mut PlaceRegistry,
        config: &FluxConfig,
        events: &mut Vec<SimulationEvent>,
    ) {
        for flux in self.fluxes.iter_mut() {
            if !flux.has_capacity() || !endpoints_present(flux, places, &mut self.missing) {
                continue;
            }
            let Some(handler) = self.handlers.get(flux.flow_kind) else {
                warn!("No handler registered for flow kind {:?}", flux.flow_kind);
                continue;
            };
            if handler.fill(flux, places, config, events) > 0 {
                events.push(SimulationEvent::FluxUpdate { flux: flux.clone() });
            }
        }

        for flux in self.fluxes.iter_mut() {
            if !flux.has_content() || !endpoints_present(flux, places, &mut self.missing) {
                continue;
            }
            let Some(handler) = self.handlers.get(flux.flow_kind) else {
                warn!("No handler registered for flow kind {:?}", flux.flow_kind);
                continue;
            };
            if handler.deliver(flux, places, events) > 0 {
                events.push(SimulationEvent::FluxUpdate { flux: flux.clone() });
            }
        }
    }
}

/// Warns the first time an endpoint goes missing; a place that comes back
/// is forgotten so a later removal warns again
fn endpoints_present(flux: &Flux, places: &PlaceRegistry, missing: &mut AHashSet<PlaceId>) -> bool {
    for id in [&flux.source_id, &flux.destination_id] {
        if !places.contains(id) {
            if missing.insert(id.clone()) {
                warn!("Flux {} references missing place {}", flux.id, id);
            }
            return false;
        }
        if !missing.is_empty() {
            missing.remove(id);
        }
    }
    true
}
