//! Districts: settlement footprints with population, jobs and needs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{world_xy, PlaceId, Polygon, Vertex};
use crate::places::commodity::{Commodity, Population};
use crate::places::resource_node::ResourceKind;
use crate::spatial::polygon::{
    bounding_radius, centroid, ensure_counter_clockwise, polygon_area, regular_polygon,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jobs {
    /// Local positions the district offers its own workers
    pub workers: Commodity,
}

/// A settlement with a polygonal footprint
///
/// `position` is the live centroid of `geometry` and `radius` the bounding
/// radius around it. Call [`District::update_derived_state`] after every
/// geometry change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "district", tag = "placeKind", rename_all = "camelCase")]
pub struct District {
    pub id: PlaceId,
    /// Serialized as flat `x`/`y`
    #[serde(flatten, with = "world_xy")]
    pub position: Vertex,
    pub radius: f64,
    /// Counter-clockwise, simple, at least 3 vertices
    pub geometry: Polygon,
    /// Always equal to `polygon_area(&geometry)`
    pub area: f64,
    pub density: u32,
    pub population: Population,
    pub jobs: Jobs,
    pub needs: BTreeMap<ResourceKind, Commodity>,
    /// Ticks since placement
    pub age: u64,
}

impl District {
    /// Fresh district: regular polygon around `center`, fully settled
    pub fn new(id: PlaceId, center: Vertex, config: &SimulationConfig) -> Self {
        let geometry = regular_polygon(
            center,
            config.places.district_radius,
            config.district.initial_vertices,
        );
        let area = polygon_area(&geometry);
        let density = config.growth.default_density;
        let capacity = config.growth.population_capacity(area, density);

        let mut needs = BTreeMap::new();
        needs.insert(
            ResourceKind::Food,
            Commodity::with_demand(config.district.food_demand),
        );

        let mut district = Self {
            id,
            position: center,
            radius: config.places.district_radius,
            geometry,
            area,
            density,
            population: Population::settled(capacity),
            jobs: Jobs {
                workers: Commodity::with_demand(config.district.local_jobs_demand),
            },
            needs,
            age: 0,
        };
        district.update_derived_state();
        district
    }

    /// Recompute area, centroid position and bounding radius from geometry
    ///
    /// Also restores counter-clockwise winding if the geometry was reversed.
    pub fn update_derived_state(&mut self) {
        ensure_counter_clockwise(&mut self.geometry);
        self.area = polygon_area(&self.geometry);
        self.position = centroid(&self.geometry);
        self.radius = bounding_radius(&self.geometry, self.position);
    }

    pub fn need(&self, kind: ResourceKind) -> Option<&Commodity> {
        self.needs.get(&kind)
    }

    pub fn need_mut(&mut self, kind: ResourceKind) -> Option<&mut Commodity> {
        self.needs.get_mut(&kind)
    }
}
