//! Declarative flux creation rules
//!
//! When a place registers, every rule matching a (source kind, destination
//! kind, self) triple produces one flux.

use crate::flux::FlowKind;
use crate::places::PlaceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluxCreationRule {
    pub source: PlaceKind,
    pub destination: PlaceKind,
    pub flow_kind: FlowKind,
    /// Applies only to fluxes from a place to itself
    pub self_flux: bool,
}

pub const FLUX_CREATION_RULES: &[FluxCreationRule] = &[
    FluxCreationRule {
        source: PlaceKind::ResourceNode,
        destination: PlaceKind::District,
        flow_kind: FlowKind::Food,
        self_flux: false,
    },
    FluxCreationRule {
        source: PlaceKind::District,
        destination: PlaceKind::ResourceNode,
        flow_kind: FlowKind::Workers,
        self_flux: false,
    },
    FluxCreationRule {
        source: PlaceKind::District,
        destination: PlaceKind::District,
        flow_kind: FlowKind::LocalJobs,
        self_flux: true,
    },
];

pub fn rules_for(
    source: PlaceKind,
    destination: PlaceKind,
    is_self: bool,
) -> impl Iterator<Item = &'static FluxCreationRule> {
    FLUX_CREATION_RULES.iter().filter(move |rule| {
        rule.source == source && rule.destination == destination && rule.self_flux == is_self
    })
}
