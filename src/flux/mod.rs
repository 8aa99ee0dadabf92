//! Flux economy: capacity-limited flows of goods and labor between places
//!
//! Fluxes are created from declarative rules when a place registers and
//! advanced every tick in two phases: every flux with spare capacity is
//! filled from its source, then every flux with content delivers to its
//! destination. The per-kind logic lives in [`handlers`].

pub mod engine;
#[allow(clippy::module_inception)]
pub mod flux;
pub mod handlers;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use engine::FluxEngine;
pub use flux::Flux;
pub use handlers::{FluxHandler, HandlerRegistry};
pub use rules::{rules_for, FluxCreationRule, FLUX_CREATION_RULES};

/// What a flux carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowKind {
    /// Resource node output delivered to a district
    Food,
    /// District workers commuting to a resource node
    Workers,
    /// District workers filling jobs in their own district
    LocalJobs,
}
