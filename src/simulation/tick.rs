//! Tick system - orchestrates simulation updates
//!
//! The [`Simulation`] owns every manager and drives them in a fixed order:
//! time -> flux fill/deliver -> resource nodes -> districts -> growth.
//!
//! Every entry point returns the events it produced, after publishing them
//! to the [`EventBus`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::core::calendar::{SimulationTime, TimeKeeper};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::PlaceId;
use crate::flux::{FluxEngine, HandlerRegistry};
use crate::growth::GrowthManager;
use crate::places::{District, PlaceRegistry, ResourceNode};
use crate::simulation::events::{
    Command, EventBus, EventCategory, EventObserver, SimulationEvent,
};
use crate::world::{DistrictManager, MapGenerator, ResourceNodeManager};

#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    places: PlaceRegistry,
    clock: TimeKeeper,
    fluxes: FluxEngine,
    districts: DistrictManager,
    resources: ResourceNodeManager,
    growth: GrowthManager,
    map: MapGenerator,
    bus: EventBus,
    scene_ready: bool,
    /// Produced outside any entry point, flushed with the next batch
    pending: Vec<SimulationEvent>,
}

impl Simulation {
    /// Build a simulation with the default flux handlers
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_flux_handlers(config, HandlerRegistry::default())
    }

    pub fn with_flux_handlers(config: SimulationConfig, handlers: HandlerRegistry) -> Result<Self> {
        config.validate()?;

        let clock = TimeKeeper::new();
        let pending = vec![SimulationEvent::TimeUpdate(clock.time())];
        info!("Simulation created with seed {}", config.seed);

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            places: PlaceRegistry::new(),
            clock,
            fluxes: FluxEngine::with_handlers(handlers),
            districts: DistrictManager::new(),
            resources: ResourceNodeManager::new(),
            growth: GrowthManager::new(),
            map: MapGenerator::new(),
            bus: EventBus::new(),
            scene_ready: false,
            pending,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn places(&self) -> &PlaceRegistry {
        &self.places
    }

    pub fn flux_engine(&self) -> &FluxEngine {
        &self.fluxes
    }

    pub fn growth(&self) -> &GrowthManager {
        &self.growth
    }

    pub fn time(&self) -> SimulationTime {
        self.clock.time()
    }

    pub fn is_scene_ready(&self) -> bool {
        self.scene_ready
    }

    pub fn subscribe(&mut self, category: EventCategory, observer: impl EventObserver + 'static) {
        self.bus.subscribe(category, observer);
    }

    pub fn subscribe_all(&mut self, observer: impl EventObserver + 'static) {
        self.bus.subscribe_all(observer);
    }

    pub fn district(&self, id: &PlaceId) -> Result<&District> {
        let place = self
            .places
            .get(id)
            .ok_or_else(|| SimError::PlaceNotFound(id.clone()))?;
        place
            .as_district()
            .ok_or_else(|| SimError::NotADistrict(id.clone()))
    }

    pub fn resource_node(&self, id: &PlaceId) -> Result<&ResourceNode> {
        let place = self
            .places
            .get(id)
            .ok_or_else(|| SimError::PlaceNotFound(id.clone()))?;
        place
            .as_resource_node()
            .ok_or_else(|| SimError::NotAResourceNode(id.clone()))
    }

    /// Dispatch an inbound command
    pub fn handle(&mut self, command: Command) -> Vec<SimulationEvent> {
        match command {
            Command::PlaceDistrict { x, y } => self.place_district(x, y),
            Command::SceneReady => self.scene_ready(),
            Command::QueryDistrict {
                request_id,
                district_id,
            } => self.query_district(request_id, district_id),
            Command::QueryResourceNode {
                request_id,
                resource_node_id,
            } => self.query_resource_node(request_id, resource_node_id),
            Command::Tick => self.tick(),
        }
    }

    /// Advance the world by one hour
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        let mut events = Vec::new();

        self.clock.tick(&mut events);
        self.fluxes
            .tick(&mut self.places, &self.config.flux, &mut events);
        self.resources.tick(&mut self.places, &mut events);
        self.districts.tick(&mut self.places, &mut events);
        self.growth
            .tick(&mut self.places, &self.config.growth, &mut self.rng, &mut events);

        self.publish(events)
    }

    /// Validate and place a district, then connect it to its neighbors
    pub fn place_district(&mut self, x: f64, y: f64) -> Vec<SimulationEvent> {
        let mut events = Vec::new();

        if let Ok(id) = self
            .districts
            .place(x, y, &mut self.places, &self.config, &mut events)
        {
            let created = self.fluxes.create_fluxes_for_place(
                &id,
                &self.places,
                &self.config.places,
                &self.config.flux,
                &mut events,
            );
            debug!("District {} connected with {} fluxes", id, created);
        }

        self.publish(events)
    }

    /// One-time world initialization; later calls are ignored
    pub fn scene_ready(&mut self) -> Vec<SimulationEvent> {
        if self.scene_ready {
            debug!("Scene already initialized, ignoring scene.ready");
            return self.publish(Vec::new());
        }
        self.scene_ready = true;

        let nodes = self.map.generate_resource_nodes(&self.config, &mut self.rng);
        self.load_resource_nodes(nodes)
    }

    /// Register externally supplied resource nodes and connect them
    pub fn load_resource_nodes(&mut self, nodes: Vec<ResourceNode>) -> Vec<SimulationEvent> {
        let mut events = vec![SimulationEvent::MapLoaded {
            resource_nodes: nodes.clone(),
        }];

        let ids = self.resources.load(nodes, &mut self.places);
        for id in &ids {
            self.fluxes.create_fluxes_for_place(
                id,
                &self.places,
                &self.config.places,
                &self.config.flux,
                &mut events,
            );
        }
        info!("Loaded {} resource nodes", ids.len());

        self.publish(events)
    }

    pub fn query_district(&mut self, request_id: String, district_id: PlaceId) -> Vec<SimulationEvent> {
        let events = self
            .districts
            .query(request_id, district_id, &self.places)
            .into_iter()
            .collect();
        self.publish(events)
    }

    pub fn query_resource_node(
        &mut self,
        request_id: String,
        resource_node_id: PlaceId,
    ) -> Vec<SimulationEvent> {
        let events = self
            .resources
            .query(request_id, resource_node_id, &self.places)
            .into_iter()
            .collect();
        self.publish(events)
    }

    fn publish(&mut self, events: Vec<SimulationEvent>) -> Vec<SimulationEvent> {
        let mut batch = std::mem::take(&mut self.pending);
        batch.extend(events);
        for event in &batch {
            self.bus.publish(event);
        }
        batch
    }
}
