use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::components::PlayerState;
use crate::sim::Module;
use crate::utils::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// First-order time constant when the throttle is advanced (s)
    pub spool_up_time: f64,
    /// First-order time constant when the throttle is retarded (s)
    pub spool_down_time: f64,
    pub idle_rpm: f64,
    pub max_rpm: f64,
    /// Burn fuel and update the vehicle mass. When off the engine never
    /// starves.
    pub track_fuel: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            spool_up_time: 1.0,
            spool_down_time: 2.0,
            idle_rpm: 700.0,
            max_rpm: 2700.0,
            track_fuel: true,
        }
    }
}

/// Advances the spooled engine setting toward `target` over `dt`.
///
/// Exponential approach with the spool-up or spool-down time constant
/// depending on direction; a non-positive time constant snaps to the target.
pub fn spool_engine(fraction: f64, target: f64, params: &EngineParams, dt: f64) -> f64 {
    let target = target.clamp(0.0, 1.0);
    let time_constant = if target > fraction {
        params.spool_up_time
    } else {
        params.spool_down_time
    };

    let next = if time_constant > 1e-6 {
        let decay = (-dt / time_constant).exp();
        target + (fraction - target) * decay
    } else {
        target
    };
    next.clamp(0.0, 1.0)
}

/// Engine spool, RPM and fuel burn.
///
/// Runs after the aerodynamic model has written thrust and fuel flow for the
/// current engine setting. Once the tanks run dry the throttle, thrust and
/// fuel flow are held at zero for the rest of the run.
pub struct Engine {
    params: EngineParams,
    starved: bool,
}

impl Engine {
    pub fn new(params: EngineParams) -> Self {
        Self {
            params,
            starved: false,
        }
    }

    pub fn is_starved(&self) -> bool {
        self.starved
    }

    fn cut(state: &mut PlayerState) {
        state.throttle = 0.0;
        state.thrust = Vector3::zeros();
        state.fuel_flow = 0.0;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineParams::default())
    }
}

impl Module for Engine {
    fn name(&self) -> &str {
        "engine"
    }

    fn initialize(&mut self, state: &mut PlayerState) -> Result<()> {
        if self.params.max_rpm < self.params.idle_rpm {
            return Err(SimError::InvalidConfig(format!(
                "max_rpm {} is below idle_rpm {}",
                self.params.max_rpm, self.params.idle_rpm
            )));
        }

        if self.params.track_fuel {
            state.fuel = state.fuel.max(0.0);
            state.mass = state.empty_mass + state.fuel;
            info!(
                "Engine initialized with {:.1} kg fuel, gross mass {:.1} kg",
                state.fuel, state.mass
            );
        }
        state.engine_fraction = state.engine_fraction.clamp(0.0, 1.0);
        Ok(())
    }

    fn update(&mut self, state: &mut PlayerState, dt: f64) -> Result<()> {
        if self.starved {
            Self::cut(state);
        }

        state.engine_fraction = spool_engine(state.engine_fraction, state.throttle, &self.params, dt);
        state.rpm = self.params.idle_rpm
            + (self.params.max_rpm - self.params.idle_rpm) * state.engine_fraction;

        if !self.params.track_fuel || self.starved {
            return Ok(());
        }

        state.fuel = (state.fuel - state.fuel_flow * dt).max(0.0);
        state.mass = state.empty_mass + state.fuel;

        if state.fuel <= 0.0 {
            self.starved = true;
            warn!("Fuel exhausted at t = {:.2} s, engine shut down", state.sim_time);
            Self::cut(state);
        }
        Ok(())
    }
}
