//! Geometry kernel for district footprints

pub mod collision;
pub mod polygon;

pub use collision::{
    find_nearest_vertex, is_simple_polygon, point_in_polygon, polygons_collide,
    segments_intersect, NearestVertex,
};
pub use polygon::{
    bounding_radius, centroid, distance_to_edge, interior_angle, outward_normal, polygon_area,
    EdgeProjection,
};
