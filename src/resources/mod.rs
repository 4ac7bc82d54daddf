pub mod environment;
pub mod tables;

pub use environment::{
    Atmosphere, AtmosphereConfig, AtmosphereProperties, AtmosphereType, EarthModel,
    EnvironmentConfig, WindConfig,
};
pub use tables::{Table2D, Table3D};
