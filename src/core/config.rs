//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section can be overridden
//! from TOML; omitted keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::flux::FlowKind;

/// Top-level configuration for the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the growth and map-generation random source
    ///
    /// Two simulations built from the same config and fed the same commands
    /// produce identical event streams.
    pub seed: u64,
    pub map: MapConfig,
    pub places: PlaceConfig,
    pub flux: FluxConfig,
    pub growth: GrowthConfig,
    pub district: DistrictDefaults,
    pub resource: ResourceDefaults,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            map: MapConfig::default(),
            places: PlaceConfig::default(),
            flux: FluxConfig::default(),
            growth: GrowthConfig::default(),
            district: DistrictDefaults::default(),
            resource: ResourceDefaults::default(),
        }
    }
}

// === MAP ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in meters (150 km)
    pub width: f64,
    /// Map height in meters (150 km)
    pub height: f64,
    /// Resource nodes generated on scene ready
    pub resource_node_count: usize,
    /// Minimum spacing between generated resource nodes (meters)
    ///
    /// Spacing is best-effort: after `max_placement_attempts` the last
    /// candidate position is accepted anyway.
    pub resource_node_spacing: f64,
    pub max_placement_attempts: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 150_000.0,
            height: 150_000.0,
            resource_node_count: 15,
            resource_node_spacing: 10_000.0,
            max_placement_attempts: 100,
        }
    }
}

// === PLACES ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceConfig {
    /// Physical radius of a freshly placed district (meters)
    pub district_radius: f64,
    /// Physical radius of a resource node (meters)
    pub resource_node_radius: f64,
    /// Distance within which a new place gets flux connections (meters)
    ///
    /// Must exceed `district_radius + resource_node_radius`, otherwise no
    /// district can ever sit close enough to a node to be connected.
    pub influence_radius: f64,
}

impl Default for PlaceConfig {
    fn default() -> Self {
        Self {
            district_radius: 1500.0,
            resource_node_radius: 1000.0,
            influence_radius: 5000.0,
        }
    }
}

// === FLUX ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxConfig {
    /// Capacity of food fluxes (units in transit)
    pub food_capacity: u32,
    /// Capacity of district → resource node worker fluxes
    pub workers_capacity: u32,
    /// Capacity of local-jobs self-fluxes
    pub local_jobs_capacity: u32,
    /// Surplus buffer above demand that fills may target
    ///
    /// At 0.1, a sink demanding 40 units is filled up to 44. The buffer is
    /// never smaller than one unit.
    pub surplus_ratio: f64,
    /// Share of flux capacity an external worker flux commits per tick
    pub external_worker_rate: f64,
    /// Share of flux capacity a local-jobs self-flux commits per tick
    pub local_worker_rate: f64,
}

impl Default for FluxConfig {
    fn default() -> Self {
        Self {
            food_capacity: 100,
            workers_capacity: 50,
            local_jobs_capacity: 50,
            surplus_ratio: 0.1,
            external_worker_rate: 0.1,
            local_worker_rate: 0.2,
        }
    }
}

impl FluxConfig {
    /// Capacity for a flow kind
    pub fn capacity_for(&self, kind: FlowKind) -> u32 {
        match kind {
            FlowKind::Food => self.food_capacity,
            FlowKind::Workers => self.workers_capacity,
            FlowKind::LocalJobs => self.local_jobs_capacity,
        }
    }

    /// Fill target for a sink: demand plus a surplus buffer of at least one unit
    pub fn target_supply(&self, demand: u32) -> u32 {
        let surplus = ((demand as f64 * self.surplus_ratio).ceil() as u32).max(1);
        demand.saturating_add(surplus)
    }
}

// === GROWTH ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Ticks a district waits between successful growth steps
    pub interval_ticks: u64,
    /// How far a vertex is pushed per spatial growth step (meters)
    ///
    /// Doubles as the border-snap threshold: neighbor vertices closer than
    /// this are candidates for merging.
    pub growth_distance: f64,
    /// Smallest interior angle a pushed vertex may form (degrees)
    pub min_angle_degrees: f64,
    /// SAT separation margin against neighbor polygons (meters)
    pub collision_margin: f64,
    /// Spatial growth stops once a district reaches this area (m²)
    pub max_area: f64,
    pub default_density: u32,
    pub max_density: u32,
    pub density_growth_amount: u32,
    /// Residents per km² at default density
    pub population_per_km2: f64,
    /// Two vertices closer than this are the same vertex (meters)
    pub snap_epsilon: f64,
    /// Vertices deviating less than this from their neighbors' line are dropped (meters)
    pub collinear_tolerance: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 10,
            growth_distance: 500.0,
            min_angle_degrees: 30.0,
            collision_margin: 3.0,
            max_area: 50_000_000.0,
            default_density: 100,
            max_density: 1000,
            density_growth_amount: 50,
            population_per_km2: 50_000.0,
            snap_epsilon: 0.01,
            collinear_tolerance: 1.0,
        }
    }
}

impl GrowthConfig {
    /// Population capacity for a footprint of `area` m² at `density`
    pub fn population_capacity(&self, area: f64, density: u32) -> u32 {
        let area_km2 = area / 1_000_000.0;
        let multiplier = density as f64 / self.default_density as f64;
        (area_km2 * self.population_per_km2 * multiplier).floor() as u32
    }
}

// === DEFAULT PLACE STATE ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictDefaults {
    /// Vertex count of the initial regular polygon
    pub initial_vertices: usize,
    /// Food units a district demands
    pub food_demand: u32,
    /// Local jobs a district offers its own workers
    pub local_jobs_demand: u32,
}

impl Default for DistrictDefaults {
    fn default() -> Self {
        Self {
            initial_vertices: 8,
            food_demand: 10,
            local_jobs_demand: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDefaults {
    /// Units produced per tick at full staffing
    pub throughput: u32,
    /// Workers a resource node needs for full staffing
    pub worker_demand: u32,
}

impl Default for ResourceDefaults {
    fn default() -> Self {
        Self {
            throughput: 10,
            worker_demand: 50,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML string and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width <= 0.0 || self.map.height <= 0.0 {
            return Err(ConfigError::Invalid("map dimensions must be positive".into()));
        }

        if self.places.district_radius <= 0.0 || self.places.resource_node_radius <= 0.0 {
            return Err(ConfigError::Invalid("place radii must be positive".into()));
        }

        let touching = self.places.district_radius + self.places.resource_node_radius;
        if self.places.influence_radius < touching {
            return Err(ConfigError::Invalid(format!(
                "influence_radius ({}) should be >= district_radius + resource_node_radius ({})",
                self.places.influence_radius, touching
            )));
        }

        if self.district.initial_vertices < 3 {
            return Err(ConfigError::Invalid(format!(
                "initial_vertices ({}) must be at least 3",
                self.district.initial_vertices
            )));
        }

        if self.growth.default_density == 0 || self.growth.default_density > self.growth.max_density {
            return Err(ConfigError::Invalid(format!(
                "default_density ({}) must be in 1..=max_density ({})",
                self.growth.default_density, self.growth.max_density
            )));
        }

        if self.growth.growth_distance <= self.growth.snap_epsilon {
            return Err(ConfigError::Invalid(
                "growth_distance must exceed snap_epsilon".into(),
            ));
        }

        for rate in [self.flux.external_worker_rate, self.flux.local_worker_rate] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!(
                    "worker flow rate {} must be within [0, 1]",
                    rate
                )));
            }
        }

        Ok(())
    }
}
