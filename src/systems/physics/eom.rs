use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::components::PlayerState;
use crate::resources::{Atmosphere, AtmosphereConfig};
use crate::sim::Module;
use crate::utils::{wrap_pi, Quaternion, Result, SimError, MIN_AIRSPEED};

/// Configuration for the equations-of-motion integrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EomParams {
    /// Body-rate magnitude limit applied after integration (rad/s)
    pub max_angular_velocity: f64,
    pub atmosphere: AtmosphereConfig,
}

impl Default for EomParams {
    fn default() -> Self {
        Self {
            max_angular_velocity: 10.0,
            atmosphere: AtmosphereConfig::default(),
        }
    }
}

/// Five degree-of-freedom rigid-body integrator.
///
/// Consumes the aerodynamic and thrust forces and the body rates already on
/// the player, then advances velocity, attitude and position by one explicit
/// Euler step. With `auto_rudder` set the yaw rate is slaved to the sideslip
/// rate and sideslip is held at zero.
pub struct EomFiveDof {
    params: EomParams,
    atmosphere: Atmosphere,
    quat: Quaternion,
    qdot: Quaternion,
}

impl EomFiveDof {
    pub fn new(params: EomParams) -> Self {
        let atmosphere = Atmosphere::new(params.atmosphere.clone());
        Self {
            params,
            atmosphere,
            quat: Quaternion::identity(),
            qdot: Quaternion::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Working attitude from the most recent step.
    pub fn quaternion(&self) -> Quaternion {
        self.quat
    }


    fn step(&mut self, state: &mut PlayerState, dt: f64) {
        // Euler is the attitude of record; re-seed the working quaternion from it
        self.quat = Quaternion::from_euler(&state.euler);

        let force = state.aero_force + state.thrust;

        // Rotational coupling of body-axis velocity
        let (u, v, w) = (state.uvw.x, state.uvw.y, state.uvw.z);
        let (p, q, r) = (state.pqr.x, state.pqr.y, state.pqr.z);
        let mut uvwdot = Vector3::new(
            r * v - q * w,
            if state.auto_rudder { 0.0 } else { p * w - r * u },
            q * u - p * v,
        );

        // Gravity in body axes
        let (sin_theta, cos_theta) = state.euler.theta.sin_cos();
        let (sin_phi, cos_phi) = state.euler.phi.sin_cos();
        let g = state.gravity;
        state.gravity_body = Vector3::new(
            -g * sin_theta,
            g * cos_theta * sin_phi,
            g * cos_theta * cos_phi,
        );

        let specific_force = if state.mass > 0.0 {
            force / state.mass
        } else {
            Vector3::zeros()
        };
        state.load_factor = if g > 0.0 {
            -specific_force.z / g
        } else {
            0.0
        };

        uvwdot += state.gravity_body + specific_force;
        state.uvwdot = uvwdot;

        state.uvw += uvwdot * dt;

        self.update_air_angles(state);

        if state.auto_rudder {
            state.pqr.z = state.beta_dot;
            state.beta = 0.0;
            state.uvw.y = 0.0;
        }

        if state.height_above_ground() < 0.0 {
            self.clamp_ground_contact(state);
        }

        state.pqr += state.pqrdot * dt;
        let rate = state.pqr.norm();
        if rate > self.params.max_angular_velocity {
            state.pqr *= self.params.max_angular_velocity / rate;
        }

        self.qdot = self.quat.qdot(&state.pqr);
        self.quat = self.quat.add(&self.qdot.scale(dt));
        self.quat.normalize();
        state.euler = self.quat.to_euler();

        self.update_position(state, dt);
    }

    /// Airspeed, angle of attack, sideslip and their rates from body velocity.
    fn update_air_angles(&self, state: &mut PlayerState) {
        let (u, v, w) = (state.uvw.x, state.uvw.y, state.uvw.z);
        let (udot, vdot, wdot) = (state.uvwdot.x, state.uvwdot.y, state.uvwdot.z);

        state.v_inf = state.uvw.norm();
        if state.v_inf < MIN_AIRSPEED {
            state.alpha = 0.0;
            state.beta = 0.0;
            state.alpha_dot = 0.0;
            state.beta_dot = 0.0;
            return;
        }

        state.alpha = w.atan2(u);
        state.beta = (v / state.v_inf).clamp(-1.0, 1.0).asin();

        let uw_sq = u * u + w * w;
        if uw_sq < MIN_AIRSPEED * MIN_AIRSPEED {
            // velocity is purely lateral, neither rate is defined
            state.alpha_dot = 0.0;
            state.beta_dot = 0.0;
            return;
        }
        let v_inf_dot = (u * udot + v * vdot + w * wdot) / state.v_inf;
        state.alpha_dot = (u * wdot - w * udot) / uw_sq;
        state.beta_dot = (state.v_inf * vdot - v * v_inf_dot) / (state.v_inf * uw_sq.sqrt());
    }

    /// Removes nose-down rotation and any descending velocity while the
    /// vehicle is below the terrain.
    fn clamp_ground_contact(&self, state: &mut PlayerState) {
        debug!(
            "Ground contact at alt {:.2} m (ground {:.2} m)",
            state.alt, state.ground_alt
        );
        state.pqr.y = state.pqr.y.max(0.0);
        state.pqrdot.y = state.pqrdot.y.max(0.0);

        let descent = self.quat.rotate(&state.uvw).z;
        if descent > 0.0 {
            state.uvw -= self.quat.rotate_inverse(&Vector3::new(0.0, 0.0, descent));
        }
    }

    fn update_position(&mut self, state: &mut PlayerState, dt: f64) {
        let mut ned = self.quat.rotate(&state.uvw) + state.wind;
        if state.height_above_ground() < 0.0 {
            ned.z = ned.z.min(0.0);
        }
        state.ned_velocity = ned;

        let (lat_dot, lon_dot) = state
            .earth_model
            .position_rates(state.lat, state.alt, ned.x, ned.y);
        state.lat += lat_dot * dt;
        let mut lon = state.lon + lon_dot * dt;
        if state.lat.abs() > FRAC_PI_2 {
            // over the pole onto the opposite meridian, now heading away from it
            state.lat = PI.copysign(state.lat) - state.lat;
            lon += PI;
            state.euler.psi = wrap_pi(state.euler.psi + PI);
        }
        state.lon = wrap_pi(lon);

        state.north += ned.x * dt;
        state.east += ned.y * dt;
        state.alt -= ned.z * dt;

        let air = self.atmosphere.properties(state.alt);
        state.rho = air.density;
        state.speed_of_sound = air.speed_of_sound;
        state.mach = state.v_inf / air.speed_of_sound;
        state.qbar = 0.5 * state.rho * state.v_inf * state.v_inf;
    }
}

impl Default for EomFiveDof {
    fn default() -> Self {
        Self::new(EomParams::default())
    }
}

impl Module for EomFiveDof {
    fn name(&self) -> &str {
        "eom_five_dof"
    }

    fn initialize(&mut self, state: &mut PlayerState) -> Result<()> {
        if state.mass <= 0.0 || !state.mass.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "vehicle mass must be positive, got {}",
                state.mass
            )));
        }
        if self.params.max_angular_velocity <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "max angular velocity must be positive, got {}",
                self.params.max_angular_velocity
            )));
        }

        self.quat = Quaternion::from_euler(&state.euler);
        self.update_air_angles(state);
        state.ned_velocity = self.quat.rotate(&state.uvw) + state.wind;

        let air = self.atmosphere.properties(state.alt);
        state.rho = air.density;
        state.speed_of_sound = air.speed_of_sound;
        state.mach = state.v_inf / air.speed_of_sound;
        state.qbar = 0.5 * state.rho * state.v_inf * state.v_inf;
        Ok(())
    }

    fn update(&mut self, state: &mut PlayerState, dt: f64) -> Result<()> {
        self.step(state, dt);

        if !state.is_finite() {
            warn!("Non-finite state after EOM step at t = {}", state.sim_time);
            return Err(SimError::PhysicsError(format!(
                "non-finite state after integration step at t = {}",
                state.sim_time
            )));
        }
        Ok(())
    }
}
