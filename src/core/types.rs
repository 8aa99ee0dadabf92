//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A polygon vertex in world space (meters)
pub type Vertex = DVec2;

/// Ordered polygon vertices, counter-clockwise for district footprints
pub type Polygon = Vec<Vertex>;

/// Simulation tick counter (one tick = one simulated hour)
pub type Tick = u64;

/// Unique identifier for places (districts and resource nodes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for fluxes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct FluxId(pub String);

impl FluxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Sequential id allocator producing `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: &'static str,
    next: u64,
}

impl IdSequence {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Round a world coordinate to whole meters
pub fn world_coord(x: f64, y: f64) -> Vertex {
    DVec2::new(x.round(), y.round())
}

/// Serde adapter writing a [`Vertex`] as `{"x": .., "y": ..}`
///
/// Used with `#[serde(flatten, with = "world_xy")]` so places expose flat
/// `x`/`y` keys on the wire.
pub mod world_xy {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Vertex;

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(vertex: &Vertex, serializer: S) -> Result<S::Ok, S::Error> {
        Xy {
            x: vertex.x,
            y: vertex.y,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vertex, D::Error> {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Vertex::new(x, y))
    }
}
