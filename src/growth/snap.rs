//! Border snap: close gaps with neighboring districts
//!
//! A vertex close to a neighbor vertex is moved exactly onto it, then the
//! neighbor's facing border is traced into this polygon so both districts
//! share the same edge vertices. Each snap is a copy-on-write transaction:
//! the candidate polygon is built separately and only committed when valid.

use crate::core::config::GrowthConfig;
use crate::core::types::{Polygon, Vertex};
use crate::growth::is_vertex_locked;
use crate::places::District;
use crate::spatial::collision::{find_nearest_vertex, is_simple_polygon, point_in_polygon};
use crate::spatial::polygon::{centroid, nearest_edge, outward_normal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Forward,
    Backward,
}

/// Snap every eligible vertex onto its nearest neighbor vertex
///
/// Returns true if any snap was committed. Near-collinear vertices left
/// behind are cleaned up afterwards.
pub fn attempt_border_snap(
    district: &mut District,
    neighbors: &[Polygon],
    config: &GrowthConfig,
) -> bool {
    if neighbors.is_empty() {
        return false;
    }

    let mut geometry = district.geometry.clone();
    let mut changed = false;

    let mut i = 0;
    while i < geometry.len() {
        if let Some(snapped) = try_snap_vertex(&geometry, i, neighbors, config) {
            geometry = snapped;
            changed = true;
        }
        i += 1;
    }

    if !changed {
        return false;
    }

    district.geometry = cleanup_collinear_vertices(&geometry, neighbors, config);
    district.update_derived_state();
    true
}

/// Build the candidate polygon for snapping `geometry[i]`, `None` if not
/// eligible or invalid
fn try_snap_vertex(
    geometry: &[Vertex],
    i: usize,
    neighbors: &[Polygon],
    config: &GrowthConfig,
) -> Option<Polygon> {
    let eps = config.snap_epsilon;
    let vertex = geometry[i];

    let nearest = find_nearest_vertex(vertex, neighbors)?;
    if nearest.distance <= eps || nearest.distance >= config.growth_distance {
        return None;
    }

    let n = geometry.len();
    let center = centroid(geometry);
    let normal = outward_normal(geometry[(i + n - 1) % n], vertex, geometry[(i + 1) % n], center);
    if normal.dot(nearest.vertex - vertex) <= 0.0 {
        return None;
    }

    // Another vertex already sits on the target
    if geometry
        .iter()
        .enumerate()
        .any(|(j, v)| j != i && v.distance(nearest.vertex) < eps)
    {
        return None;
    }

    let mut candidate = geometry.to_vec();
    candidate[i] = nearest.vertex;

    let neighbor = &neighbors[nearest.polygon_index];
    let mut traced = walk_border(neighbor, nearest.vertex_index, Walk::Backward, center, &candidate, eps);
    traced.reverse();
    traced.extend(walk_border(neighbor, nearest.vertex_index, Walk::Forward, center, &candidate, eps));

    for v in traced {
        if candidate.iter().any(|c| c.distance(v) < eps) {
            continue;
        }
        let at = nearest_edge(v, &candidate).map_or(candidate.len(), |edge| edge + 1);
        candidate.insert(at, v);
    }

    if !is_simple_polygon(&candidate) || overlaps_neighbors(&candidate, neighbors, eps) {
        return None;
    }
    Some(candidate)
}

/// Neighbor vertices facing `center`, walking away from `start`
///
/// Stops at the first vertex whose outward normal turns away from `center`.
/// Vertices `existing` already has are skipped but do not stop the walk.
fn walk_border(
    neighbor: &[Vertex],
    start: usize,
    direction: Walk,
    center: Vertex,
    existing: &[Vertex],
    eps: f64,
) -> Vec<Vertex> {
    let len = neighbor.len();
    let neighbor_center = centroid(neighbor);
    let mut collected = Vec::new();

    for step in 1..len {
        let idx = match direction {
            Walk::Forward => (start + step) % len,
            Walk::Backward => (start + len - step % len) % len,
        };
        let v = neighbor[idx];
        let normal = outward_normal(
            neighbor[(idx + len - 1) % len],
            v,
            neighbor[(idx + 1) % len],
            neighbor_center,
        );
        if normal.dot(center - v) <= 0.0 {
            break;
        }
        if existing.iter().any(|e| e.distance(v) < eps) {
            continue;
        }
        collected.push(v);
    }

    collected
}

/// True if any vertex not shared with a neighbor lies inside one
fn overlaps_neighbors(geometry: &[Vertex], neighbors: &[Polygon], eps: f64) -> bool {
    geometry
        .iter()
        .filter(|v| !is_vertex_locked(**v, neighbors, eps))
        .any(|v| neighbors.iter().any(|neighbor| point_in_polygon(*v, neighbor)))
}

/// Drop non-locked vertices that barely deviate from the line through
/// their neighbors
///
/// Two adjacent vertices are never dropped in the same pass. Polygons with
/// four or fewer vertices are returned unchanged, as is any cleanup that
/// would leave fewer than three vertices or a self-intersection.
pub fn cleanup_collinear_vertices(
    geometry: &[Vertex],
    neighbors: &[Polygon],
    config: &GrowthConfig,
) -> Polygon {
    let n = geometry.len();
    if n <= 4 {
        return geometry.to_vec();
    }

    let mut keep = vec![true; n];
    for i in 0..n {
        let current = geometry[i];
        if is_vertex_locked(current, neighbors, config.snap_epsilon) {
            continue;
        }

        let prev_idx = (i + n - 1) % n;
        let next_idx = (i + 1) % n;
        let prev = geometry[prev_idx];
        let next = geometry[next_idx];

        let base = prev.distance(next);
        if base == 0.0 {
            continue;
        }
        let deviation = (current - prev).perp_dot(next - prev).abs() / base;

        if deviation < config.collinear_tolerance && keep[prev_idx] && keep[next_idx] {
            keep[i] = false;
        }
    }

    let cleaned: Polygon = geometry
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(v, _)| *v)
        .collect();

    if cleaned.len() < 3 || !is_simple_polygon(&cleaned) {
        return geometry.to_vec();
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::PlaceId;
    use crate::spatial::polygon::{polygon_area, regular_polygon};

    fn district_at(x: f64, y: f64) -> District {
        District::new(PlaceId::from("district-1"), Vertex::new(x, y), &SimulationConfig::default())
    }

    fn contains(polygon: &[Vertex], v: Vertex) -> bool {
        polygon.iter().any(|p| p.distance(v) < 1e-9)
    }

    #[test]
    fn test_snap_traces_facing_border() {
        let config = GrowthConfig::default();
        let mut district = district_at(0.0, 0.0);
        // Neighbor's west vertex sits 400m east of our east vertex
        let neighbor = regular_polygon(Vertex::new(3400.0, 0.0), 1500.0, 8);
        let neighbors = vec![neighbor.clone()];

        assert!(attempt_border_snap(&mut district, &neighbors, &config));

        assert!(contains(&district.geometry, neighbor[4]));
        assert!(contains(&district.geometry, neighbor[3]));
        assert!(contains(&district.geometry, neighbor[5]));
        assert!(!contains(&district.geometry, neighbor[2]));
        assert!(is_simple_polygon(&district.geometry));
        assert_eq!(district.area, polygon_area(&district.geometry));
    }

    #[test]
    fn test_far_neighbor_is_not_snapped() {
        let mut district = district_at(0.0, 0.0);
        let geometry = district.geometry.clone();
        let neighbors = vec![regular_polygon(Vertex::new(5000.0, 0.0), 1500.0, 8)];

        assert!(!attempt_border_snap(&mut district, &neighbors, &GrowthConfig::default()));
        assert_eq!(district.geometry, geometry);
    }

    #[test]
    fn test_invalid_snap_is_reverted() {
        let mut district = district_at(0.0, 0.0);
        let geometry = district.geometry.clone();
        // Corner 300m east of our east vertex, but the body already covers
        // our north-east vertex, so the snapped shape would overlap
        let neighbor = vec![
            Vertex::new(1800.0, 0.0),
            Vertex::new(4000.0, 0.0),
            Vertex::new(4000.0, 3000.0),
            Vertex::new(-500.0, 3000.0),
        ];
        assert!(point_in_polygon(geometry[1], &neighbor));

        let config = GrowthConfig::default();
        let neighbors = vec![neighbor];
        assert!(try_snap_vertex(&geometry, 0, &neighbors, &config).is_none());
        assert!(!attempt_border_snap(&mut district, &neighbors, &config));
        assert_eq!(district.geometry, geometry);
    }

    #[test]
    fn test_already_merged_vertex_is_not_snapped_again() {
        let mut district = district_at(0.0, 0.0);
        let neighbors = vec![district.geometry.clone()];
        assert!(!attempt_border_snap(&mut district, &neighbors, &GrowthConfig::default()));
    }

    #[test]
    fn test_no_neighbors() {
        let mut district = district_at(0.0, 0.0);
        assert!(!attempt_border_snap(&mut district, &[], &GrowthConfig::default()));
    }

    #[test]
    fn test_overlap_ignores_shared_vertices() {
        let district = district_at(0.0, 0.0);
        let eps = GrowthConfig::default().snap_epsilon;

        // Reaches over our east vertex
        let covering = vec![
            Vertex::new(1200.0, -300.0),
            Vertex::new(1800.0, -300.0),
            Vertex::new(1800.0, 300.0),
            Vertex::new(1200.0, 300.0),
        ];
        assert!(overlaps_neighbors(&district.geometry, &[covering], eps));

        // Touches only at a shared vertex
        let east = district.geometry[0];
        let touching = vec![
            east,
            east + Vertex::new(500.0, -500.0),
            east + Vertex::new(500.0, 500.0),
        ];
        assert!(!overlaps_neighbors(&district.geometry, &[touching], eps));
    }

    fn rect_with_midpoints() -> Polygon {
        vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(20.0, 0.0),
            Vertex::new(20.0, 10.0),
            Vertex::new(10.0, 10.0),
            Vertex::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_cleanup_drops_collinear_vertices() {
        let cleaned = cleanup_collinear_vertices(&rect_with_midpoints(), &[], &GrowthConfig::default());
        assert_eq!(
            cleaned,
            vec![
                Vertex::new(0.0, 0.0),
                Vertex::new(20.0, 0.0),
                Vertex::new(20.0, 10.0),
                Vertex::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_cleanup_keeps_locked_vertices() {
        let neighbors = vec![vec![
            Vertex::new(10.0, 0.0),
            Vertex::new(15.0, -10.0),
            Vertex::new(5.0, -10.0),
        ]];
        let cleaned = cleanup_collinear_vertices(&rect_with_midpoints(), &neighbors, &GrowthConfig::default());
        assert_eq!(cleaned.len(), 5);
        assert!(contains(&cleaned, Vertex::new(10.0, 0.0)));
        assert!(!contains(&cleaned, Vertex::new(10.0, 10.0)));
    }

    #[test]
    fn test_cleanup_never_drops_adjacent_pair() {
        // Three consecutive points on the bottom edge
        let polygon = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(20.0, 0.0),
            Vertex::new(30.0, 0.0),
            Vertex::new(30.0, 10.0),
            Vertex::new(0.0, 10.0),
        ];
        let cleaned = cleanup_collinear_vertices(&polygon, &[], &GrowthConfig::default());
        assert_eq!(cleaned.len(), 5);
        assert!(!contains(&cleaned, Vertex::new(10.0, 0.0)));
        assert!(contains(&cleaned, Vertex::new(20.0, 0.0)));
    }

    #[test]
    fn test_cleanup_skips_small_polygons() {
        let square = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(10.0, 10.0),
            Vertex::new(0.0, 10.0),
        ];
        assert_eq!(cleanup_collinear_vertices(&square, &[], &GrowthConfig::default()), square);
    }
}
