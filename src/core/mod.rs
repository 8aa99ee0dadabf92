pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{SimulationTime, TimeKeeper};
pub use config::SimulationConfig;
pub use error::{ConfigError, Result, SimError};
