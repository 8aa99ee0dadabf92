//! Burgflow - settlement growth and flux economy simulation

pub mod core;
pub mod flux;
pub mod growth;
pub mod places;
pub mod simulation;
pub mod spatial;
pub mod world;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{Result, SimError};
pub use crate::simulation::{Command, Simulation, SimulationEvent};
