//! Spatial growth: push border vertices outward into free space

use rand::Rng;

use crate::core::config::GrowthConfig;
use crate::core::types::{Polygon, Vertex};
use crate::growth::is_vertex_locked;
use crate::places::District;
use crate::spatial::collision::{is_simple_polygon, polygons_collide};
use crate::spatial::polygon::{centroid, interior_angle, outward_normal, polygon_area};

/// Fractions of the growth distance tried in order
const PUSH_SCALES: [f64; 3] = [1.0, 0.5, 0.25];

/// Push one random vertex and its successor along their outward normals
///
/// Returns true if at least one vertex moved. Districts at or above the
/// maximum area never grow spatially, and no push may cross it.
pub fn attempt_spatial_growth<R: Rng + ?Sized>(
    district: &mut District,
    neighbors: &[Polygon],
    config: &GrowthConfig,
    rng: &mut R,
) -> bool {
    if district.area >= config.max_area || district.geometry.len() < 3 {
        return false;
    }

    let mut geometry = district.geometry.clone();
    let start = rng.gen_range(0..geometry.len());
    let mut pair = [start, (start + 1) % geometry.len()];
    let mut grew = false;

    for step in 0..pair.len() {
        let idx = pair[step];
        if is_vertex_locked(geometry[idx], neighbors, config.snap_epsilon) {
            continue;
        }
        let Some(replacement) = grow_vertex(&geometry, idx, neighbors, config) else {
            continue;
        };

        let inserted = replacement.len() - 1;
        geometry.splice(idx..=idx, replacement);
        grew = true;

        // An inserted midpoint shifts everything after it
        if step == 0 && pair[1] > idx {
            pair[1] += inserted;
        }
    }

    if grew {
        district.geometry = geometry;
        district.update_derived_state();
    }
    grew
}

/// Replacement vertices for `geometry[idx]`, or `None` if no push fits
///
/// A push is accepted when the candidate polygon stays simple, clears every
/// neighbor by the collision margin and keeps the angle at the moved vertex
/// above the minimum. Too-sharp spikes get a midpoint toward the next vertex.
fn grow_vertex(
    geometry: &[Vertex],
    idx: usize,
    neighbors: &[Polygon],
    config: &GrowthConfig,
) -> Option<Vec<Vertex>> {
    let n = geometry.len();
    let prev = geometry[(idx + n - 1) % n];
    let current = geometry[idx];
    let next = geometry[(idx + 1) % n];

    let normal = outward_normal(prev, current, next, centroid(geometry));
    if normal.length_squared() == 0.0 {
        return None;
    }

    for scale in PUSH_SCALES {
        let distance = config.growth_distance * scale;
        let target = current + normal * distance;

        let mut candidate = geometry.to_vec();
        candidate[idx] = target;
        if !fits(&candidate, neighbors, config) {
            continue;
        }

        if interior_angle(prev, target, next) >= config.min_angle_degrees {
            return Some(vec![target]);
        }

        let mid = (target + next) / 2.0 + normal * distance * 0.5;
        candidate.insert(idx + 1, mid);
        if fits(&candidate, neighbors, config) {
            return Some(vec![target, mid]);
        }
    }

    None
}

/// The area cap is a ceiling: a push may not carry the district past it
fn fits(candidate: &[Vertex], neighbors: &[Polygon], config: &GrowthConfig) -> bool {
    polygon_area(candidate) <= config.max_area
        && is_simple_polygon(candidate)
        && !neighbors
            .iter()
            .any(|neighbor| polygons_collide(candidate, neighbor, config.collision_margin))
}
