//! District placement, aging and queries

use tracing::{info, warn};

use crate::core::config::SimulationConfig;
use crate::core::types::{world_coord, IdSequence, PlaceId};
use crate::places::{District, PlaceKind, PlaceRegistry};
use crate::simulation::events::{RejectionReason, SimulationEvent};

#[derive(Debug, Clone)]
pub struct DistrictManager {
    ids: IdSequence,
}

impl Default for DistrictManager {
    fn default() -> Self {
        Self {
            ids: IdSequence::new("district"),
        }
    }
}

impl DistrictManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a placement request and register the new district
    ///
    /// Coordinates are rounded to whole meters first. On success emits
    /// `district.new` and returns the id; on failure emits
    /// `placement.rejected` and returns the reason. Flux creation for the new
    /// district is left to the caller.
    pub fn place(
        &mut self,
        x: f64,
        y: f64,
        places: &mut PlaceRegistry,
        config: &SimulationConfig,
        events: &mut Vec<SimulationEvent>,
    ) -> Result<PlaceId, RejectionReason> {
        let center = world_coord(x, y);

        let reason = if !(0.0..=config.map.width).contains(&center.x)
            || !(0.0..=config.map.height).contains(&center.y)
        {
            Some(RejectionReason::OutOfBounds)
        } else if places.check_collision_strict(center, config.places.district_radius) {
            Some(RejectionReason::Collision)
        } else {
            None
        };

        if let Some(reason) = reason {
            info!("Placement at ({}, {}) rejected: {:?}", center.x, center.y, reason);
            events.push(SimulationEvent::PlacementRejected {
                x: center.x,
                y: center.y,
                reason,
            });
            return Err(reason);
        }

        let id = PlaceId::new(self.ids.next_id());
        let district = District::new(id.clone(), center, config);
        info!(
            "District {} placed at ({}, {}) with population {}",
            id, center.x, center.y, district.population.total.current
        );
        events.push(SimulationEvent::DistrictNew {
            district: district.clone(),
        });
        places.register(district);
        Ok(id)
    }

    /// Age every district by one tick and report its state
    pub fn tick(&self, places: &mut PlaceRegistry, events: &mut Vec<SimulationEvent>) {
        for id in places.ids_of_kind(PlaceKind::District) {
            if let Some(district) = places.district_mut(&id) {
                district.age += 1;
                events.push(SimulationEvent::DistrictUpdate {
                    district: district.clone(),
                });
            }
        }
    }

    /// Answer a UI query; unknown ids produce no response
    pub fn query(
        &self,
        request_id: String,
        district_id: PlaceId,
        places: &PlaceRegistry,
    ) -> Option<SimulationEvent> {
        let Some(district) = places.district(&district_id) else {
            warn!("Query {} for unknown district {}", request_id, district_id);
            return None;
        };
        Some(SimulationEvent::DistrictResponse {
            data: district.clone(),
            request_id,
            district_id,
        })
    }
}
