use nalgebra::Vector3;
use tracing::info;

use super::{wind_to_body, AeroModel};
use crate::components::{FlightCondition, PlayerState};
use crate::sim::Module;
use crate::utils::{Result, MIN_AIRSPEED};

/// Scheduled wrapper that evaluates an [`AeroModel`] against the player's
/// air data and writes coefficients, body-axis aerodynamic force, thrust and
/// fuel flow back onto the state.
///
/// Thrust is evaluated at the spooled `engine_fraction` an engine module
/// writes. Without one, the fraction tracks the commanded throttle.
pub struct AeroModule<M: AeroModel> {
    name: String,
    model: M,
    spooled_engine: bool,
}

impl<M: AeroModel> AeroModule<M> {
    pub fn new(name: impl Into<String>, model: M) -> Self {
        Self {
            name: name.into(),
            model,
            spooled_engine: true,
        }
    }

    pub fn with_spooled_engine(mut self, spooled: bool) -> Self {
        self.spooled_engine = spooled;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    fn apply(&self, state: &mut PlayerState) {
        state.qbar = 0.5 * state.rho * state.v_inf * state.v_inf;
        if !self.spooled_engine {
            state.engine_fraction = state.throttle;
        }

        let condition = FlightCondition {
            alpha: state.alpha,
            beta: state.beta,
            mach: state.mach,
            altitude: state.alt,
            throttle: state.engine_fraction,
            rho: state.rho,
        };

        if state.v_inf < MIN_AIRSPEED {
            state.coefficients = Default::default();
            state.aero_force = Vector3::zeros();
        } else {
            state.coefficients = self.model.coefficients(&condition);
            state.aero_force = wind_to_body(
                &state.coefficients,
                state.alpha,
                state.beta,
                state.qbar,
                state.wing_area,
            );
        }

        let propulsion = self.model.propulsion(&condition);
        state.thrust = Vector3::new(propulsion.thrust, 0.0, 0.0);
        state.fuel_flow = propulsion.fuel_flow;
    }
}

impl<M: AeroModel> Module for AeroModule<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, state: &mut PlayerState) -> Result<()> {
        self.model.calibrate()?;
        self.apply(state);
        info!(
            "{} initialized: CL={:.4}, CD={:.5}, thrust={:.1} N",
            self.name, state.coefficients.cl, state.coefficients.cd, state.thrust.x
        );
        Ok(())
    }

    fn update(&mut self, state: &mut PlayerState, _dt: f64) -> Result<()> {
        self.apply(state);
        Ok(())
    }
}
