//! Per-flow-kind fill and deliver logic

pub mod food;
pub mod workers;

use ahash::AHashMap;

use crate::core::config::FluxConfig;
use crate::flux::{FlowKind, Flux};
use crate::places::PlaceRegistry;
use crate::simulation::events::SimulationEvent;

pub use food::FoodHandler;
pub use workers::WorkerHandler;

/// Moves one kind of flow between places
///
/// Both methods return the amount moved. Zero means nothing changed; an
/// endpoint of the wrong kind is treated the same way.
pub trait FluxHandler {
    /// Pull from the source into the flux
    fn fill(
        &self,
        flux: &mut Flux,
        places: &mut PlaceRegistry,
        config: &FluxConfig,
        events: &mut Vec<SimulationEvent>,
    ) -> u32;

    /// Push flux content into the destination
    fn deliver(
        &self,
        flux: &mut Flux,
        places: &mut PlaceRegistry,
        events: &mut Vec<SimulationEvent>,
    ) -> u32;
}

/// Lookup table from flow kind to handler
pub struct HandlerRegistry {
    handlers: AHashMap<FlowKind, Box<dyn FluxHandler>>,
}

impl HandlerRegistry {
    /// Empty registry; every flux contributes zero flow until handlers are added
    pub fn empty() -> Self {
        Self {
            handlers: AHashMap::new(),
        }
    }

    pub fn register(&mut self, kind: FlowKind, handler: Box<dyn FluxHandler>) {
        self.handlers.insert(kind, handler);
    }

    pub fn get(&self, kind: FlowKind) -> Option<&dyn FluxHandler> {
        self.handlers.get(&kind).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, kind: FlowKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(FlowKind::Food, Box::new(FoodHandler));
        registry.register(FlowKind::Workers, Box::new(WorkerHandler));
        registry.register(FlowKind::LocalJobs, Box::new(WorkerHandler));
        registry
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_every_flow_kind() {
        let registry = HandlerRegistry::default();
        for kind in [FlowKind::Food, FlowKind::Workers, FlowKind::LocalJobs] {
            assert!(registry.contains(kind), "missing handler for {:?}", kind);
        }
    }

    #[test]
    fn test_empty_registry_has_no_handlers() {
        let registry = HandlerRegistry::empty();
        assert!(registry.get(FlowKind::Food).is_none());
    }
}
