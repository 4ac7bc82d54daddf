use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::{AeroCoefficients, AutoPilotCmds};
use crate::resources::EarthModel;
use crate::utils::{Euler, GRAVITY, ISA_SEA_LEVEL_DENSITY};

/// Aggregate vehicle state.
///
/// Every physical quantity in the simulation lives here. Modules read and
/// write it through the `&mut PlayerState` handed to them each frame; they
/// keep no copies of their own. Body axes are x forward, y right, z down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    // Timing
    pub sim_time: f64,
    pub frame: u64,

    // Position
    /// Geodetic latitude (rad)
    pub lat: f64,
    /// Geodetic longitude (rad)
    pub lon: f64,
    /// Altitude above mean sea level (m)
    pub alt: f64,
    /// Terrain elevation below the vehicle (m)
    pub ground_alt: f64,
    /// Flat-earth displacement from the start point (m)
    pub north: f64,
    pub east: f64,

    // Kinematics
    /// Body-axis velocity (m/s)
    pub uvw: Vector3<f64>,
    pub uvwdot: Vector3<f64>,
    /// Body rates (rad/s)
    pub pqr: Vector3<f64>,
    pub pqrdot: Vector3<f64>,
    /// Attitude of record
    pub euler: Euler,
    /// Inertial velocity in NED axes, wind included (m/s)
    pub ned_velocity: Vector3<f64>,

    // Forces and moments, body axes
    pub aero_force: Vector3<f64>,
    pub aero_moment: Vector3<f64>,
    pub thrust: Vector3<f64>,
    pub thrust_moment: Vector3<f64>,
    /// Gravitational acceleration resolved in body axes (m/s^2)
    pub gravity_body: Vector3<f64>,
    /// Normal load factor (g)
    pub load_factor: f64,

    // Air data
    pub rho: f64,
    pub speed_of_sound: f64,
    pub mach: f64,
    pub alpha: f64,
    pub beta: f64,
    pub alpha_dot: f64,
    pub beta_dot: f64,
    /// True airspeed (m/s)
    pub v_inf: f64,
    /// Dynamic pressure (Pa)
    pub qbar: f64,
    pub coefficients: AeroCoefficients,

    // Propulsion
    /// Throttle lever in [0, 1]
    pub throttle: f64,
    /// Spooled engine setting in [0, 1]
    pub engine_fraction: f64,
    pub rpm: f64,
    /// Fuel on board (kg)
    pub fuel: f64,
    /// Fuel flow (kg/s)
    pub fuel_flow: f64,

    // Mass and geometry
    pub mass: f64,
    pub empty_mass: f64,
    pub wing_area: f64,

    // Environment
    /// Steady wind in NED axes (m/s)
    pub wind: Vector3<f64>,
    pub gravity: f64,
    pub earth_model: EarthModel,

    /// Slave yaw rate to sideslip rate and hold sideslip at zero.
    pub auto_rudder: bool,

    pub ap_cmds: AutoPilotCmds,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            sim_time: 0.0,
            frame: 0,
            lat: 0.0,
            lon: 0.0,
            alt: 0.0,
            ground_alt: 0.0,
            north: 0.0,
            east: 0.0,
            uvw: Vector3::zeros(),
            uvwdot: Vector3::zeros(),
            pqr: Vector3::zeros(),
            pqrdot: Vector3::zeros(),
            euler: Euler::default(),
            ned_velocity: Vector3::zeros(),
            aero_force: Vector3::zeros(),
            aero_moment: Vector3::zeros(),
            thrust: Vector3::zeros(),
            thrust_moment: Vector3::zeros(),
            gravity_body: Vector3::zeros(),
            load_factor: 1.0,
            rho: ISA_SEA_LEVEL_DENSITY,
            speed_of_sound: 340.294,
            mach: 0.0,
            alpha: 0.0,
            beta: 0.0,
            alpha_dot: 0.0,
            beta_dot: 0.0,
            v_inf: 0.0,
            qbar: 0.0,
            coefficients: AeroCoefficients::default(),
            throttle: 0.0,
            engine_fraction: 0.0,
            rpm: 0.0,
            fuel: 0.0,
            fuel_flow: 0.0,
            mass: 1000.0,
            empty_mass: 1000.0,
            wing_area: 16.2,
            wind: Vector3::zeros(),
            gravity: GRAVITY,
            earth_model: EarthModel::default(),
            auto_rudder: true,
            ap_cmds: AutoPilotCmds::default(),
        }
    }
}

impl PlayerState {
    /// Downward NED velocity (m/s).
    pub fn vdown(&self) -> f64 {
        self.ned_velocity.z
    }

    /// Climb rate, positive up (m/s).
    pub fn climb_rate(&self) -> f64 {
        -self.ned_velocity.z
    }

    /// Height above the terrain (m).
    pub fn height_above_ground(&self) -> f64 {
        self.alt - self.ground_alt
    }

    /// True when every floating point field is finite.
    pub fn is_finite(&self) -> bool {
        let vectors = [
            &self.uvw,
            &self.uvwdot,
            &self.pqr,
            &self.pqrdot,
            &self.ned_velocity,
            &self.aero_force,
            &self.aero_moment,
            &self.thrust,
            &self.thrust_moment,
            &self.gravity_body,
            &self.wind,
        ];
        let scalars = [
            self.sim_time,
            self.lat,
            self.lon,
            self.alt,
            self.ground_alt,
            self.north,
            self.east,
            self.load_factor,
            self.rho,
            self.speed_of_sound,
            self.mach,
            self.alpha,
            self.beta,
            self.alpha_dot,
            self.beta_dot,
            self.v_inf,
            self.qbar,
            self.coefficients.cl,
            self.coefficients.cd,
            self.coefficients.cy,
            self.throttle,
            self.engine_fraction,
            self.rpm,
            self.fuel,
            self.fuel_flow,
            self.mass,
            self.empty_mass,
            self.wing_area,
            self.gravity,
        ];

        self.euler.is_finite()
            && vectors.iter().all(|v| v.iter().all(|x| x.is_finite()))
            && scalars.iter().all(|x| x.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_finite() {
        assert!(PlayerState::default().is_finite());
    }

    #[test]
    fn test_nan_is_detected() {
        let mut state = PlayerState::default();
        state.uvw.y = f64::NAN;
        assert!(!state.is_finite());

        let mut state = PlayerState::default();
        state.euler.theta = f64::INFINITY;
        assert!(!state.is_finite());
    }

    #[test]
    fn test_vertical_helpers() {
        let state = PlayerState {
            alt: 1200.0,
            ground_alt: 200.0,
            ned_velocity: Vector3::new(50.0, 0.0, -3.0),
            ..Default::default()
        };
        assert_eq!(state.climb_rate(), 3.0);
        assert_eq!(state.vdown(), -3.0);
        assert_eq!(state.height_above_ground(), 1000.0);
    }
}
