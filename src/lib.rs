//! Deterministic five degree-of-freedom flight dynamics core.
//!
//! A [`Player`] owns the vehicle state and a list of [`Module`]s, each run at
//! its own rate as simulated time advances. The modules provided here cover
//! aerodynamic coefficient models, an autopilot, an engine and the equations
//! of motion; [`config::build_player`] assembles them from a YAML or JSON
//! description.

pub mod components;
pub mod config;
pub mod resources;
pub mod sim;
pub mod systems;
pub mod utils;

pub use components::PlayerState;
pub use config::{build_player, SimulationConfig};
pub use sim::{Module, Player};
pub use utils::{Result, SimError};
