use thiserror::Error;

use crate::core::types::PlaceId;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),

    #[error("Place {0} is not a district")]
    NotADistrict(PlaceId),

    #[error("Place {0} is not a resource node")]
    NotAResourceNode(PlaceId),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating a [`crate::core::config::SimulationConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
