//! Polygon measurements: area, centroid, radius, normals, angles
//!
//! Pure functions over [`Polygon`] vertex lists. Polygons are implicitly
//! closed (the last vertex connects back to the first).

use geo::Area;
use geo_types::LineString;

use crate::core::types::{Polygon, Vertex};

/// Area in m², always non-negative. Zero for fewer than 3 vertices.
pub fn polygon_area(vertices: &[Vertex]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    to_geo_polygon(vertices).unsigned_area()
}

/// Geometric center of a polygon
///
/// Returns the origin for empty input and the vertex average when the
/// polygon has no area (collinear or fewer than 3 vertices).
pub fn centroid(vertices: &[Vertex]) -> Vertex {
    if vertices.is_empty() {
        return Vertex::ZERO;
    }

    let n = vertices.len();
    let mut sum = Vertex::ZERO;
    let mut double_area = 0.0;

    for i in 0..n {
        let current = vertices[i];
        let next = vertices[(i + 1) % n];
        let cross = current.x * next.y - next.x * current.y;
        double_area += cross;
        sum += (current + next) * cross;
    }

    if double_area.abs() < f64::EPSILON {
        let total: Vertex = vertices.iter().copied().sum();
        return total / n as f64;
    }

    sum / (3.0 * double_area)
}

/// Radius of the circle centered at `center` that contains every vertex
pub fn bounding_radius(vertices: &[Vertex], center: Vertex) -> f64 {
    vertices
        .iter()
        .map(|v| v.distance_squared(center))
        .fold(0.0, f64::max)
        .sqrt()
}

/// Unit direction pointing away from the polygon interior at `current`
///
/// Averages the perpendiculars of the two adjacent edges, then flips the
/// result if it points toward `center`.
pub fn outward_normal(prev: Vertex, current: Vertex, next: Vertex, center: Vertex) -> Vertex {
    let edge1 = current - prev;
    let edge2 = next - current;

    let mut normal = edge1.perp() + edge2.perp();
    let length = normal.length();
    if length > 0.0 {
        normal /= length;
    }

    if normal.dot(current - center) < 0.0 {
        normal = -normal;
    }
    normal
}

/// Angle at `current` between the arms to `prev` and `next`, in degrees
pub fn interior_angle(prev: Vertex, current: Vertex, next: Vertex) -> f64 {
    let v1 = prev - current;
    let v2 = next - current;

    let len1 = v1.length();
    let len2 = v2.length();
    if len1 == 0.0 || len2 == 0.0 {
        return 0.0;
    }

    let cos_angle = (v1.dot(v2) / (len1 * len2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Projection of a point onto a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeProjection {
    /// Distance from the point to the clamped projection
    pub distance: f64,
    /// Closest point on the segment
    pub projected: Vertex,
    /// Whether the unclamped projection falls within the segment
    pub on_segment: bool,
}

pub fn distance_to_edge(point: Vertex, edge_start: Vertex, edge_end: Vertex) -> EdgeProjection {
    let edge = edge_end - edge_start;
    let length_sq = edge.length_squared();

    if length_sq == 0.0 {
        return EdgeProjection {
            distance: point.distance(edge_start),
            projected: edge_start,
            on_segment: true,
        };
    }

    let t = (point - edge_start).dot(edge) / length_sq;
    let on_segment = (0.0..=1.0).contains(&t);
    let projected = edge_start + edge * t.clamp(0.0, 1.0);

    EdgeProjection {
        distance: point.distance(projected),
        projected,
        on_segment,
    }
}

/// Index of the edge (by start vertex) nearest to `point`
pub fn nearest_edge(point: Vertex, polygon: &[Vertex]) -> Option<usize> {
    if polygon.len() < 2 {
        return None;
    }

    let n = polygon.len();
    let mut best = (f64::INFINITY, 0);
    for i in 0..n {
        let projection = distance_to_edge(point, polygon[i], polygon[(i + 1) % n]);
        if projection.distance < best.0 {
            best = (projection.distance, i);
        }
    }
    Some(best.1)
}

/// Regular polygon with `sides` vertices on a circle, counter-clockwise
pub fn regular_polygon(center: Vertex, circumradius: f64, sides: usize) -> Polygon {
    (0..sides)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / sides as f64;
            center + Vertex::new(angle.cos(), angle.sin()) * circumradius
        })
        .collect()
}

/// Reverse the vertex order if the polygon winds clockwise
pub fn ensure_counter_clockwise(vertices: &mut Polygon) {
    if vertices.len() < 3 {
        return;
    }
    if to_geo_polygon(vertices).signed_area() < 0.0 {
        vertices.reverse();
    }
}

pub fn is_counter_clockwise(vertices: &[Vertex]) -> bool {
    vertices.len() >= 3 && to_geo_polygon(vertices).signed_area() > 0.0
}

fn to_geo_polygon(vertices: &[Vertex]) -> geo_types::Polygon<f64> {
    let coords: Vec<(f64, f64)> = vertices.iter().map(|v| (v.x, v.y)).collect();
    geo_types::Polygon::new(LineString::from(coords), vec![])
}
