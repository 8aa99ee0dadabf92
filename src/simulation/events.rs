//! Typed inbound commands and outbound events
//!
//! Events serialize as `{"type": "<wire name>", "payload": {...}}` so an
//! external transport can forward them unchanged. Observers subscribe per
//! [`EventCategory`] and are called synchronously, in production order.

use serde::{Deserialize, Serialize};

use crate::core::calendar::SimulationTime;
use crate::core::types::PlaceId;
use crate::flux::Flux;
use crate::places::{District, ResourceNode};

/// Why a placement request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Overlaps an existing place
    Collision,
    /// Outside the map
    OutOfBounds,
}

/// Requests from the input and UI layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    #[serde(rename = "build.placementRequested")]
    PlaceDistrict { x: f64, y: f64 },

    #[serde(rename = "scene.ready")]
    SceneReady,

    #[serde(rename = "ui.query.district")]
    QueryDistrict {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "districtId")]
        district_id: PlaceId,
    },

    #[serde(rename = "ui.query.resourceNode")]
    QueryResourceNode {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "resourceNodeId")]
        resource_node_id: PlaceId,
    },

    #[serde(rename = "simulation.tick")]
    Tick,
}

/// Everything the simulation reports to the outside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SimulationEvent {
    #[serde(rename = "district.new")]
    DistrictNew { district: District },

    #[serde(rename = "district.update")]
    DistrictUpdate { district: District },

    #[serde(rename = "placement.rejected")]
    PlacementRejected {
        x: f64,
        y: f64,
        reason: RejectionReason,
    },

    #[serde(rename = "map.loaded")]
    MapLoaded {
        #[serde(rename = "resourceNodes")]
        resource_nodes: Vec<ResourceNode>,
    },

    #[serde(rename = "simulation.district.response")]
    DistrictResponse {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "districtId")]
        district_id: PlaceId,
        data: District,
    },

    #[serde(rename = "simulation.resourceNode.response")]
    ResourceNodeResponse {
        #[serde(rename = "requestId")]
        request_id: String,
        #[serde(rename = "resourceNodeId")]
        resource_node_id: PlaceId,
        data: ResourceNode,
    },

    #[serde(rename = "flux.new")]
    FluxNew { flux: Flux },

    #[serde(rename = "flux.update")]
    FluxUpdate { flux: Flux },

    #[serde(rename = "resourceNode.update")]
    ResourceNodeUpdate {
        #[serde(rename = "resourceNode")]
        resource_node: ResourceNode,
    },

    #[serde(rename = "simulation.time.update")]
    TimeUpdate(SimulationTime),
}

/// Coarse grouping used for subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    District,
    Placement,
    Map,
    Query,
    Flux,
    ResourceNode,
    Time,
}

impl SimulationEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            SimulationEvent::DistrictNew { .. } | SimulationEvent::DistrictUpdate { .. } => {
                EventCategory::District
            }
            SimulationEvent::PlacementRejected { .. } => EventCategory::Placement,
            SimulationEvent::MapLoaded { .. } => EventCategory::Map,
            SimulationEvent::DistrictResponse { .. }
            | SimulationEvent::ResourceNodeResponse { .. } => EventCategory::Query,
            SimulationEvent::FluxNew { .. } | SimulationEvent::FluxUpdate { .. } => {
                EventCategory::Flux
            }
            SimulationEvent::ResourceNodeUpdate { .. } => EventCategory::ResourceNode,
            SimulationEvent::TimeUpdate(_) => EventCategory::Time,
        }
    }

    /// Wire name used by the external transport
    pub fn name(&self) -> &'static str {
        match self {
            SimulationEvent::DistrictNew { .. } => "district.new",
            SimulationEvent::DistrictUpdate { .. } => "district.update",
            SimulationEvent::PlacementRejected { .. } => "placement.rejected",
            SimulationEvent::MapLoaded { .. } => "map.loaded",
            SimulationEvent::DistrictResponse { .. } => "simulation.district.response",
            SimulationEvent::ResourceNodeResponse { .. } => "simulation.resourceNode.response",
            SimulationEvent::FluxNew { .. } => "flux.new",
            SimulationEvent::FluxUpdate { .. } => "flux.update",
            SimulationEvent::ResourceNodeUpdate { .. } => "resourceNode.update",
            SimulationEvent::TimeUpdate(_) => "simulation.time.update",
        }
    }
}

/// Receives published events
pub trait EventObserver {
    fn on_event(&mut self, event: &SimulationEvent);
}

impl<F> EventObserver for F
where
    F: FnMut(&SimulationEvent),
{
    fn on_event(&mut self, event: &SimulationEvent) {
        self(event)
    }
}

struct Subscription {
    /// `None` receives every category
    category: Option<EventCategory>,
    observer: Box<dyn EventObserver>,
}

/// Synchronous one-producer, many-consumer dispatch
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, category: EventCategory, observer: impl EventObserver + 'static) {
        self.subscriptions.push(Subscription {
            category: Some(category),
            observer: Box::new(observer),
        });
    }

    pub fn subscribe_all(&mut self, observer: impl EventObserver + 'static) {
        self.subscriptions.push(Subscription {
            category: None,
            observer: Box::new(observer),
        });
    }

    /// Deliver to matching observers in subscription order
    pub fn publish(&mut self, event: &SimulationEvent) {
        let category = event.category();
        for subscription in self.subscriptions.iter_mut() {
            if subscription.category.map_or(true, |c| c == category) {
                subscription.observer.on_event(event);
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.subscriptions.len())
            .finish()
    }
}
