//! Per-district growth cooldown

use ahash::AHashMap;
use rand::Rng;
use tracing::{debug, info};

use crate::core::config::GrowthConfig;
use crate::core::types::{PlaceId, Polygon, Tick};
use crate::growth::grow_district;
use crate::places::{PlaceKind, PlaceRegistry};
use crate::simulation::events::SimulationEvent;

/// Runs growth attempts for districts whose cooldown has expired
///
/// A district that has never grown counts from tick 0, so with the default
/// interval of 10 its first attempt is on tick 10.
#[derive(Debug, Clone, Default)]
pub struct GrowthManager {
    current_tick: Tick,
    last_growth: AHashMap<PlaceId, Tick>,
}

impl GrowthManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn last_growth(&self, id: &PlaceId) -> Tick {
        self.last_growth.get(id).copied().unwrap_or(0)
    }

    /// Advance the growth clock and grow every eligible district
    ///
    /// Returns the number of districts that changed.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        places: &mut PlaceRegistry,
        config: &GrowthConfig,
        rng: &mut R,
        events: &mut Vec<SimulationEvent>,
    ) -> usize {
        self.current_tick += 1;
        let mut grown = 0;

        for id in places.ids_of_kind(PlaceKind::District) {
            if self.current_tick - self.last_growth(&id) < config.interval_ticks {
                continue;
            }

            let neighbors: Vec<Polygon> = places
                .districts()
                .filter(|other| other.id != id)
                .map(|other| other.geometry.clone())
                .collect();

            let Some(district) = places.district_mut(&id) else {
                continue;
            };

            let outcome = grow_district(district, &neighbors, config, rng);
            if !outcome.changed() {
                debug!("District {} could not grow", id);
                continue;
            }

            info!(
                "District {} grew: area {}k m2, density {}, vertices {}",
                id,
                (district.area / 1000.0).floor(),
                district.density,
                district.geometry.len()
            );
            events.push(SimulationEvent::DistrictUpdate {
                district: district.clone(),
            });
            self.last_growth.insert(id, self.current_tick);
            grown += 1;
        }

        grown
    }
}
