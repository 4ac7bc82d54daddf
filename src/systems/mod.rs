pub mod aerodynamics;
pub mod autopilot;
pub mod physics;
pub mod propulsion;

pub use aerodynamics::{
    AeroModel, AeroModule, CalibrationPoint, DragPolar, InverseDesign, InverseDesignParams,
    LinearAero, LinearAeroParams, TableAero, TrimCondition,
};
pub use autopilot::{Autopilot, AutopilotParams, Pid, PidParams};
pub use physics::{EomFiveDof, EomParams};
pub use propulsion::{Engine, EngineParams};
