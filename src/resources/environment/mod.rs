mod atmosphere;
mod config;
mod earth;

pub use atmosphere::{Atmosphere, AtmosphereProperties};
pub use config::{AtmosphereConfig, AtmosphereType, EnvironmentConfig, WindConfig};
pub use earth::EarthModel;
