//! Polygon collision and validity tests
//!
//! Separating Axis Theorem overlap, ray-casting containment, nearest-vertex
//! search and self-intersection checks.

use crate::core::types::{Polygon, Vertex};

/// Ray-casting parity test. Points exactly on an edge may land either way.
pub fn point_in_polygon(point: Vertex, polygon: &[Vertex]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;

    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[j];

        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Project every vertex onto `axis`, returning (min, max)
fn project(polygon: &[Vertex], axis: Vertex) -> (f64, f64) {
    polygon
        .iter()
        .map(|v| v.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

fn projections_overlap(a: (f64, f64), b: (f64, f64), margin: f64) -> bool {
    !(a.1 < b.0 + margin || b.1 < a.0 + margin)
}

/// Separating Axis Theorem overlap test
///
/// Every edge normal of both polygons is tried as a separating axis.
/// `margin` is subtracted from the overlap, so a positive margin lets
/// polygons that barely touch count as separated. Polygons with fewer than
/// 3 vertices never collide.
pub fn polygons_collide(a: &[Vertex], b: &[Vertex], margin: f64) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }

    for polygon in [a, b] {
        let n = polygon.len();
        for i in 0..n {
            let edge = polygon[(i + 1) % n] - polygon[i];
            let axis = edge.perp();
            let length = axis.length();
            if length == 0.0 {
                continue;
            }
            let axis = axis / length;

            if !projections_overlap(project(a, axis), project(b, axis), margin) {
                return false;
            }
        }
    }

    true
}

/// Result of [`find_nearest_vertex`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestVertex {
    pub vertex: Vertex,
    pub distance: f64,
    pub polygon_index: usize,
    pub vertex_index: usize,
}

/// Linear scan for the vertex nearest to `vertex` across `polygons`
pub fn find_nearest_vertex(vertex: Vertex, polygons: &[Polygon]) -> Option<NearestVertex> {
    let mut nearest: Option<NearestVertex> = None;

    for (polygon_index, polygon) in polygons.iter().enumerate() {
        for (vertex_index, other) in polygon.iter().enumerate() {
            let distance = vertex.distance(*other);
            if nearest.map_or(true, |n| distance < n.distance) {
                nearest = Some(NearestVertex {
                    vertex: *other,
                    distance,
                    polygon_index,
                    vertex_index,
                });
            }
        }
    }

    nearest
}

/// Proper intersection of segments p1-p2 and p3-p4
///
/// Parallel or collinear segments and shared endpoints do not count.
pub fn segments_intersect(p1: Vertex, p2: Vertex, p3: Vertex, p4: Vertex) -> bool {
    let det = (p2.x - p1.x) * (p4.y - p3.y) - (p4.x - p3.x) * (p2.y - p1.y);
    if det == 0.0 {
        return false;
    }

    let lambda = ((p4.y - p3.y) * (p4.x - p1.x) + (p3.x - p4.x) * (p4.y - p1.y)) / det;
    let gamma = ((p1.y - p2.y) * (p4.x - p1.x) + (p2.x - p1.x) * (p4.y - p1.y)) / det;

    lambda > 0.0 && lambda < 1.0 && gamma > 0.0 && gamma < 1.0
}

/// True when no two non-adjacent edges cross
pub fn is_simple_polygon(polygon: &[Vertex]) -> bool {
    let n = polygon.len();
    if n < 4 {
        return true;
    }

    for i in 0..n {
        let a1 = polygon[i];
        let a2 = polygon[(i + 1) % n];
        for j in (i + 2)..n {
            // First and last edges share vertex 0
            if i == 0 && j == n - 1 {
                continue;
            }
            let b1 = polygon[j];
            let b2 = polygon[(j + 1) % n];
            if segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}
