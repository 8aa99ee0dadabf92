//! District growth
//!
//! Each eligible district runs three steps per growth attempt:
//! 1. Spatial growth pushes vertices outward into free space
//! 2. Border snap closes gaps with neighboring districts (always attempted)
//! 3. Density growth, only when neither of the above changed anything

pub mod density;
pub mod manager;
pub mod snap;
pub mod spatial;

use rand::Rng;

use crate::core::config::GrowthConfig;
use crate::core::types::{Polygon, Vertex};
use crate::places::District;
use crate::spatial::collision::find_nearest_vertex;

pub use density::attempt_density_growth;
pub use manager::GrowthManager;
pub use snap::{attempt_border_snap, cleanup_collinear_vertices};
pub use spatial::attempt_spatial_growth;

/// Which steps of a growth attempt changed the district
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthOutcome {
    pub spatial: bool,
    pub snapped: bool,
    pub densified: bool,
}

impl GrowthOutcome {
    pub fn changed(&self) -> bool {
        self.spatial || self.snapped || self.densified
    }
}

/// Run one full growth attempt on `district`
pub fn grow_district<R: Rng + ?Sized>(
    district: &mut District,
    neighbors: &[Polygon],
    config: &GrowthConfig,
    rng: &mut R,
) -> GrowthOutcome {
    let spatial = attempt_spatial_growth(district, neighbors, config, rng);
    let snapped = attempt_border_snap(district, neighbors, config);
    let densified = !spatial && !snapped && attempt_density_growth(district, config);

    GrowthOutcome {
        spatial,
        snapped,
        densified,
    }
}

/// A vertex shared with a neighbor polygon (within `eps`)
pub fn is_vertex_locked(vertex: Vertex, neighbors: &[Polygon], eps: f64) -> bool {
    find_nearest_vertex(vertex, neighbors).map_or(false, |nearest| nearest.distance < eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::PlaceId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_vertex_lock() {
        let neighbors = vec![vec![Vertex::new(10.0, 10.0), Vertex::new(20.0, 10.0)]];
        assert!(is_vertex_locked(Vertex::new(10.0, 10.005), &neighbors, 0.01));
        assert!(!is_vertex_locked(Vertex::new(10.0, 10.5), &neighbors, 0.01));
        assert!(!is_vertex_locked(Vertex::new(10.0, 10.0), &[], 0.01));
    }

    #[test]
    fn test_max_area_district_falls_back_to_density() {
        let mut district = District::new(
            PlaceId::from("district-1"),
            Vertex::new(0.0, 0.0),
            &SimulationConfig::default(),
        );
        let config = GrowthConfig {
            max_area: district.area + 1.0,
            ..GrowthConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let outcome = grow_district(&mut district, &[], &config, &mut rng);
        assert_eq!(
            outcome,
            GrowthOutcome {
                spatial: false,
                snapped: false,
                densified: true
            }
        );
        assert_eq!(district.density, 150);
    }

    #[test]
    fn test_spatial_growth_skips_density() {
        let mut district = District::new(
            PlaceId::from("district-1"),
            Vertex::new(0.0, 0.0),
            &SimulationConfig::default(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let outcome = grow_district(&mut district, &[], &GrowthConfig::default(), &mut rng);
        assert!(outcome.spatial);
        assert!(!outcome.densified);
        assert_eq!(district.density, 100);
    }
}
