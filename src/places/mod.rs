//! Places: districts and resource nodes on the map
//!
//! Both kinds share identity, position and a physical radius. The registry
//! stores them uniformly as [`Place`] and hands out typed views on request.

pub mod commodity;
pub mod district;
pub mod registry;
pub mod resource_node;

use serde::{Deserialize, Serialize};

use crate::core::types::{PlaceId, Vertex};

pub use commodity::{Commodity, Population, PopulationSegment};
pub use district::{District, Jobs};
pub use registry::PlaceRegistry;
pub use resource_node::{ResourceKind, ResourceNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceKind {
    District,
    ResourceNode,
}

/// Either kind of place
///
/// Both structs write their own `placeKind` tag, so the enum adds none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Place {
    District(District),
    ResourceNode(ResourceNode),
}

impl Place {
    pub fn id(&self) -> &PlaceId {
        match self {
            Place::District(d) => &d.id,
            Place::ResourceNode(n) => &n.id,
        }
    }

    pub fn position(&self) -> Vertex {
        match self {
            Place::District(d) => d.position,
            Place::ResourceNode(n) => n.position,
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            Place::District(d) => d.radius,
            Place::ResourceNode(n) => n.radius,
        }
    }

    pub fn kind(&self) -> PlaceKind {
        match self {
            Place::District(_) => PlaceKind::District,
            Place::ResourceNode(_) => PlaceKind::ResourceNode,
        }
    }

    pub fn distance_to(&self, other: &Place) -> f64 {
        self.position().distance(other.position())
    }

    pub fn as_district(&self) -> Option<&District> {
        match self {
            Place::District(d) => Some(d),
            Place::ResourceNode(_) => None,
        }
    }

    pub fn as_district_mut(&mut self) -> Option<&mut District> {
        match self {
            Place::District(d) => Some(d),
            Place::ResourceNode(_) => None,
        }
    }

    pub fn as_resource_node(&self) -> Option<&ResourceNode> {
        match self {
            Place::ResourceNode(n) => Some(n),
            Place::District(_) => None,
        }
    }

    pub fn as_resource_node_mut(&mut self) -> Option<&mut ResourceNode> {
        match self {
            Place::ResourceNode(n) => Some(n),
            Place::District(_) => None,
        }
    }
}

impl From<District> for Place {
    fn from(district: District) -> Self {
        Place::District(district)
    }
}

impl From<ResourceNode> for Place {
    fn from(node: ResourceNode) -> Self {
        Place::ResourceNode(node)
    }
}
