pub mod aerodynamics;
pub mod autopilot;
pub mod state;
pub mod waypoint;

pub use aerodynamics::{AeroCoefficients, AircraftGeometry, FlightCondition, PropulsionOutput};
pub use autopilot::AutoPilotCmds;
pub use state::PlayerState;
pub use waypoint::Waypoint;
