//! Place registry with radius-bounded neighbor queries
//!
//! Places are keyed by id for O(1) lookup. A registration sequence number is
//! kept alongside each place so iteration and tie-breaking follow the order
//! in which places were registered.

use std::collections::BTreeMap;

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::core::types::{PlaceId, Vertex};
use crate::places::district::District;
use crate::places::resource_node::ResourceNode;
use crate::places::{Place, PlaceKind};

/// A neighbor returned by [`PlaceRegistry::nearby_places`]
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub id: PlaceId,
    pub kind: PlaceKind,
    pub distance: f64,
}

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    place: Place,
}

#[derive(Debug, Clone, Default)]
pub struct PlaceRegistry {
    places: AHashMap<PlaceId, Slot>,
    order: BTreeMap<u64, PlaceId>,
    next_seq: u64,
}

impl PlaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a place, returning the place it replaced if the id was taken
    ///
    /// A replaced place keeps its original registration position.
    pub fn register(&mut self, place: impl Into<Place>) -> Option<Place> {
        let place = place.into();
        let id = place.id().clone();

        if let Some(slot) = self.places.get_mut(&id) {
            return Some(std::mem::replace(&mut slot.place, place));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id.clone());
        self.places.insert(id, Slot { seq, place });
        None
    }

    pub fn unregister(&mut self, id: &PlaceId) -> Option<Place> {
        let slot = self.places.remove(id)?;
        self.order.remove(&slot.seq);
        Some(slot.place)
    }

    pub fn get(&self, id: &PlaceId) -> Option<&Place> {
        self.places.get(id).map(|slot| &slot.place)
    }

    pub fn get_mut(&mut self, id: &PlaceId) -> Option<&mut Place> {
        self.places.get_mut(id).map(|slot| &mut slot.place)
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.places.contains_key(id)
    }

    pub fn district(&self, id: &PlaceId) -> Option<&District> {
        self.get(id).and_then(Place::as_district)
    }

    pub fn district_mut(&mut self, id: &PlaceId) -> Option<&mut District> {
        self.get_mut(id).and_then(Place::as_district_mut)
    }

    pub fn resource_node(&self, id: &PlaceId) -> Option<&ResourceNode> {
        self.get(id).and_then(Place::as_resource_node)
    }

    pub fn resource_node_mut(&mut self, id: &PlaceId) -> Option<&mut ResourceNode> {
        self.get_mut(id).and_then(Place::as_resource_node_mut)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// All places in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Place> + '_ {
        self.order
            .values()
            .filter_map(move |id| self.places.get(id).map(|slot| &slot.place))
    }

    pub fn districts(&self) -> impl Iterator<Item = &District> + '_ {
        self.iter().filter_map(Place::as_district)
    }

    pub fn resource_nodes(&self) -> impl Iterator<Item = &ResourceNode> + '_ {
        self.iter().filter_map(Place::as_resource_node)
    }

    /// Ids of the given kind in registration order
    pub fn ids_of_kind(&self, kind: PlaceKind) -> Vec<PlaceId> {
        self.iter()
            .filter(|place| place.kind() == kind)
            .map(|place| place.id().clone())
            .collect()
    }

    /// Places within `radius` of `place_id`, nearest first
    ///
    /// Linear scan over every registered place. The queried place itself is
    /// excluded and the radius is inclusive. Equal distances fall back to
    /// registration order. Unknown ids yield an empty list.
    pub fn nearby_places(&self, place_id: &PlaceId, radius: f64) -> Vec<NearbyPlace> {
        let Some(origin) = self.get(place_id) else {
            return Vec::new();
        };
        let center = origin.position();

        let mut found: Vec<(OrderedFloat<f64>, u64, NearbyPlace)> = self
            .places
            .values()
            .filter(|slot| slot.place.id() != place_id)
            .filter_map(|slot| {
                let distance = slot.place.position().distance(center);
                (distance <= radius).then(|| {
                    (
                        OrderedFloat(distance),
                        slot.seq,
                        NearbyPlace {
                            id: slot.place.id().clone(),
                            kind: slot.place.kind(),
                            distance,
                        },
                    )
                })
            })
            .collect();

        found.sort_by_key(|(distance, seq, _)| (*distance, *seq));
        found.into_iter().map(|(_, _, nearby)| nearby).collect()
    }

    /// True if a circle at `position` with `radius` would overlap any place
    ///
    /// Touching circles (distance exactly equal to the summed radii) do not
    /// collide.
    pub fn check_collision_strict(&self, position: Vertex, radius: f64) -> bool {
        self.places.values().any(|slot| {
            position.distance(slot.place.position()) < radius + slot.place.radius()
        })
    }
}
