pub mod events;
pub mod tick;

pub use events::{
    Command, EventBus, EventCategory, EventObserver, RejectionReason, SimulationEvent,
};
pub use tick::Simulation;
