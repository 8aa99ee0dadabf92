use serde::{Deserialize, Serialize};

use crate::core::types::{FluxId, PlaceId};
use crate::flux::FlowKind;

/// A capacity-limited flow connection between two places
///
/// Source and destination may be the same place (self-flux).
/// Invariant: `content <= capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flux {
    pub id: FluxId,
    pub source_id: PlaceId,
    pub destination_id: PlaceId,
    pub flow_kind: FlowKind,
    pub capacity: u32,
    content: u32,
    /// Distance between the endpoints at creation time (meters)
    pub distance: f64,
}

impl Flux {
    pub fn new(
        id: FluxId,
        source_id: PlaceId,
        destination_id: PlaceId,
        flow_kind: FlowKind,
        distance: f64,
        capacity: u32,
    ) -> Self {
        Self {
            id,
            source_id,
            destination_id,
            flow_kind,
            capacity,
            content: 0,
            distance,
        }
    }

    pub fn content(&self) -> u32 {
        self.content
    }

    pub fn is_self_flux(&self) -> bool {
        self.source_id == self.destination_id
    }

    pub fn spare_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.content)
    }

    /// Add up to the spare capacity, returns amount actually added
    pub fn add_content(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.spare_capacity());
        self.content += added;
        added
    }

    /// Remove up to the current content, returns amount actually removed
    pub fn remove_content(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.content);
        self.content -= removed;
        removed
    }

    pub fn has_content(&self) -> bool {
        self.content > 0
    }

    pub fn has_capacity(&self) -> bool {
        self.content < self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flux(capacity: u32) -> Flux {
        Flux::new(
            FluxId::new("flux-1"),
            PlaceId::from("resource-node-1"),
            PlaceId::from("district-1"),
            FlowKind::Food,
            2500.0,
            capacity,
        )
    }

    #[test]
    fn test_add_content_caps_at_capacity() {
        let mut f = flux(100);
        assert_eq!(f.add_content(95), 95);
        assert_eq!(f.add_content(10), 5);
        assert_eq!(f.content(), 100);
        assert!(!f.has_capacity());
    }

    #[test]
    fn test_remove_content_caps_at_content() {
        let mut f = flux(100);
        f.add_content(4);
        assert_eq!(f.remove_content(10), 4);
        assert!(!f.has_content());
        assert_eq!(f.remove_content(1), 0);
    }

    #[test]
    fn test_self_flux_detection() {
        let mut f = flux(50);
        assert!(!f.is_self_flux());
        f.destination_id = f.source_id.clone();
        assert!(f.is_self_flux());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(flux(100)).unwrap();
        assert_eq!(json["sourceId"], "resource-node-1");
        assert_eq!(json["destinationId"], "district-1");
        assert_eq!(json["flowKind"], "food");
        assert_eq!(json["content"], 0);
    }
}
