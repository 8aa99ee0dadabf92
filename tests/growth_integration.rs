//! Integration tests for district growth
//!
//! Growth runs inside the full tick loop here, with neighboring districts
//! competing for space. Geometry must stay valid after every step.

use burgflow::core::config::{GrowthConfig, SimulationConfig};
use burgflow::core::types::{PlaceId, Vertex};
use burgflow::growth::{attempt_spatial_growth, grow_district, GrowthOutcome};
use burgflow::places::District;
use burgflow::simulation::{Simulation, SimulationEvent};
use burgflow::spatial::is_simple_polygon;
use burgflow::spatial::polygon::polygon_area;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn place(sim: &mut Simulation, x: f64, y: f64) -> PlaceId {
    sim.place_district(x, y)
        .into_iter()
        .find_map(|event| match event {
            SimulationEvent::DistrictNew { district } => Some(district.id),
            _ => None,
        })
        .expect("district placed")
}

#[test]
fn test_geometry_stays_valid_through_growth() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let ids = [
        place(&mut sim, 40_000.0, 40_000.0),
        place(&mut sim, 43_400.0, 40_000.0),
        place(&mut sim, 41_700.0, 43_000.0),
    ];

    for _ in 0..200 {
        sim.tick();

        for id in &ids {
            let district = sim.district(id).unwrap();
            assert!(is_simple_polygon(&district.geometry), "{} self-intersects", id);
            assert!((district.area - polygon_area(&district.geometry)).abs() < 1e-6);
            assert!(district.geometry.len() >= 3);
        }
    }
}

#[test]
fn test_districts_grow_over_time() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let id = place(&mut sim, 70_000.0, 70_000.0);
    let initial_area = sim.district(&id).unwrap().area;

    for _ in 0..100 {
        sim.tick();
    }

    let district = sim.district(&id).unwrap();
    assert!(district.area > initial_area);
    assert_eq!(sim.growth().last_growth(&id), 100);
}

#[test]
fn test_district_just_below_cap_cannot_push() {
    let config = SimulationConfig::default();
    let mut district = District::new(PlaceId::from("district-1"), Vertex::new(0.0, 0.0), &config);
    let growth = GrowthConfig {
        max_area: district.area + 1.0,
        ..config.growth.clone()
    };
    let before = district.geometry.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    assert!(!attempt_spatial_growth(&mut district, &[], &growth, &mut rng));
    assert_eq!(district.geometry, before);

    // The other steps still run: with no neighbor to snap to, density takes over
    let outcome = grow_district(&mut district, &[], &growth, &mut rng);
    assert_eq!(
        outcome,
        GrowthOutcome {
            spatial: false,
            snapped: false,
            densified: true,
        }
    );
    assert_eq!(district.density, config.growth.default_density + config.growth.density_growth_amount);
}

#[test]
fn test_density_stops_at_maximum() {
    let config = SimulationConfig::default();
    let mut district = District::new(PlaceId::from("district-1"), Vertex::new(0.0, 0.0), &config);
    let growth = GrowthConfig {
        max_area: district.area,
        ..config.growth.clone()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    for _ in 0..100 {
        grow_district(&mut district, &[], &growth, &mut rng);
    }
    assert_eq!(district.density, growth.max_density);

    let population = district.population;
    let outcome = grow_district(&mut district, &[], &growth, &mut rng);
    assert!(!outcome.changed());
    assert_eq!(district.population, population);
}
