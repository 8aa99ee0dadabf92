//! Managers that populate and age the world

pub mod districts;
pub mod map;
pub mod resources;

pub use districts::DistrictManager;
pub use map::MapGenerator;
pub use resources::ResourceNodeManager;
