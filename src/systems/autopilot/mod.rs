mod pid;

pub use pid::{Pid, PidParams};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{AutoPilotCmds, PlayerState};
use crate::sim::Module;
use crate::utils::{
    ground_track, wrap_pi, Quaternion, Result, SimError, GRAVITY, MAX_TURN_COMP_BANK,
};

/// Gains and limits of the autopilot control laws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotParams {
    /// Bank per unit of heading error per unit airspeed (s/m)
    pub heading_gain: f64,
    /// Roll rate per unit of bank error (1/s)
    pub roll_gain: f64,
    pub max_bank_rate: f64,
    /// Climb rate per metre of altitude error (1/s); used when no
    /// `altitude_pid` is given
    pub altitude_gain: f64,
    pub altitude_pid: Option<PidParams>,
    pub vs_gain: f64,
    /// Weight of the vertical acceleration in the climb-rate error (s)
    pub vs_damping: f64,
    pub max_g: f64,
    pub min_g: f64,
    /// Pitch margin over which the g envelope fades out near the pitch limits
    pub pitch_soft_band: f64,
    /// Throttle per m/s of speed error
    pub speed_gain: f64,
    pub spool_time: f64,
    pub min_throttle: f64,
    pub max_throttle: f64,
    /// Floor on forward speed in the pitch-rate law (m/s)
    pub min_control_speed: f64,
    /// Steer ground track rather than heading
    pub track_mode: bool,
}

impl Default for AutopilotParams {
    fn default() -> Self {
        Self {
            heading_gain: 0.02,
            roll_gain: 1.0,
            max_bank_rate: 15.0_f64.to_radians(),
            altitude_gain: 0.1,
            altitude_pid: None,
            vs_gain: 0.5,
            vs_damping: 0.5,
            max_g: 2.0,
            min_g: 0.0,
            pitch_soft_band: 5.0_f64.to_radians(),
            speed_gain: 0.05,
            spool_time: 2.0,
            min_throttle: 0.0,
            max_throttle: 1.0,
            min_control_speed: 10.0,
            track_mode: false,
        }
    }
}

impl AutopilotParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_throttle > self.max_throttle {
            return Err(SimError::InvalidConfig(format!(
                "min_throttle {} exceeds max_throttle {}",
                self.min_throttle, self.max_throttle
            )));
        }
        if self.max_g < 1.0 || self.min_g > 1.0 {
            return Err(SimError::InvalidConfig(format!(
                "g envelope [{}, {}] must contain 1 g",
                self.min_g, self.max_g
            )));
        }
        if !(self.spool_time > 0.0 && self.spool_time.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "spool_time must be positive, got {}",
                self.spool_time
            )));
        }
        if self.pitch_soft_band <= 0.0 || self.min_control_speed <= 0.0 {
            return Err(SimError::InvalidConfig(
                "pitch_soft_band and min_control_speed must be positive".into(),
            ));
        }
        Ok(())
    }

    fn altitude_controller(&self) -> Pid {
        Pid::new(
            self.altitude_pid
                .unwrap_or_else(|| PidParams::proportional(self.altitude_gain)),
        )
    }
}

/// Heading or ground-track reference the heading law compares against.
fn heading_reference(params: &AutopilotParams, state: &PlayerState) -> f64 {
    if params.track_mode {
        ground_track(&state.ned_velocity)
    } else {
        state.euler.psi
    }
}

/// Commanded bank angle and the roll rate that chases it.
pub fn heading_hold(
    params: &AutopilotParams,
    cmds: &AutoPilotCmds,
    state: &PlayerState,
) -> (f64, f64) {
    let max_bank = cmds.max_bank.abs();

    let bank_cmd = if cmds.orbit_hold {
        if cmds.orbit_right {
            max_bank
        } else {
            -max_bank
        }
    } else {
        let error = wrap_pi(cmds.heading - heading_reference(params, state));
        (params.heading_gain * error * state.v_inf).clamp(-max_bank, max_bank)
    };

    let max_rate = params.max_bank_rate.abs();
    let roll_rate = (params.roll_gain * (bank_cmd - state.euler.phi)).clamp(-max_rate, max_rate);
    (bank_cmd, roll_rate)
}

/// Climb-rate command from the altitude error, limited to the configured
/// maximum vertical speed.
pub fn altitude_hold(pid: &mut Pid, cmds: &AutoPilotCmds, state: &PlayerState, dt: f64) -> f64 {
    let max_vs = cmds.max_vs.abs();
    pid.update(cmds.altitude - state.alt, dt)
        .clamp(-max_vs, max_vs)
}

/// Pitch rate that drives the climb rate toward `vs_cmd`.
pub fn vertical_speed_hold(
    params: &AutopilotParams,
    cmds: &AutoPilotCmds,
    state: &PlayerState,
    vs_cmd: f64,
) -> f64 {
    let u = state.uvw.x.max(params.min_control_speed);
    let theta = state.euler.theta;

    // inertial acceleration: body-frame derivative plus transport term
    let accel_body = state.uvwdot + state.pqr.cross(&state.uvw);
    let accel_down = Quaternion::from_euler(&state.euler).rotate(&accel_body).z;
    let error = vs_cmd + state.vdown() + params.vs_damping * accel_down;
    let q_cmd = params.vs_gain * error / u;

    // g envelope, fading to zero as pitch approaches its limits
    let band = params.pitch_soft_band;
    let up_margin = ((cmds.max_pitch - theta) / band).clamp(0.0, 1.0);
    let down_margin = ((theta - cmds.min_pitch) / band).clamp(0.0, 1.0);
    let q_max = (params.max_g - 1.0) * GRAVITY / u * up_margin;
    let q_min = (params.min_g - 1.0) * GRAVITY / u * down_margin;

    let phi = state
        .euler
        .phi
        .clamp(-MAX_TURN_COMP_BANK, MAX_TURN_COMP_BANK);
    let turn_compensation = state.pqr.z * phi.tan();

    q_cmd.max(q_min).min(q_max) + turn_compensation
}

/// Throttle after one step of the speed law, always within the throttle limits.
pub fn speed_hold(
    params: &AutopilotParams,
    cmds: &AutoPilotCmds,
    state: &PlayerState,
    dt: f64,
) -> f64 {
    let error = if cmds.use_mach {
        (cmds.mach - state.mach) * state.speed_of_sound
    } else {
        cmds.speed - state.v_inf
    };

    let lead = state.uvwdot.x * params.spool_time;
    let throttle =
        state.throttle + params.speed_gain * (error - lead) * dt / params.spool_time;

    throttle.max(params.min_throttle).min(params.max_throttle)
}

/// Heading, altitude, vertical-speed and speed holds.
///
/// Each law is enabled by its flag in [`AutoPilotCmds`]; altitude hold takes
/// precedence over vertical-speed hold. The laws write roll rate, pitch rate
/// and throttle on the player and leave everything else alone.
pub struct Autopilot {
    params: AutopilotParams,
    altitude_pid: Pid,
}

impl Autopilot {
    pub fn new(params: AutopilotParams) -> Self {
        let altitude_pid = params.altitude_controller();
        Self {
            params,
            altitude_pid,
        }
    }

    pub fn params(&self) -> &AutopilotParams {
        &self.params
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(AutopilotParams::default())
    }
}

impl Module for Autopilot {
    fn name(&self) -> &str {
        "autopilot"
    }

    fn initialize(&mut self, state: &mut PlayerState) -> Result<()> {
        self.params.validate()?;
        self.altitude_pid.reset();

        if !state.ap_cmds.captured {
            let heading = heading_reference(&self.params, state);
            let cmds = &mut state.ap_cmds;
            cmds.heading = heading;
            cmds.altitude = state.alt;
            cmds.vertical_speed = -state.ned_velocity.z;
            cmds.speed = state.v_inf;
            cmds.mach = state.mach;
            cmds.captured = true;
            info!(
                "Autopilot captured heading {:.3} rad, altitude {:.1} m, speed {:.1} m/s",
                cmds.heading, cmds.altitude, cmds.speed
            );
        }
        Ok(())
    }

    fn update(&mut self, state: &mut PlayerState, dt: f64) -> Result<()> {
        let cmds = state.ap_cmds.clone();

        if cmds.heading_hold || cmds.orbit_hold {
            let (_, roll_rate) = heading_hold(&self.params, &cmds, state);
            state.pqr.x = roll_rate;
        }

        let vs_cmd = if cmds.altitude_hold {
            Some(altitude_hold(&mut self.altitude_pid, &cmds, state, dt))
        } else if cmds.vs_hold {
            Some(cmds.vertical_speed)
        } else {
            None
        };
        if let Some(vs_cmd) = vs_cmd {
            state.pqr.y = vertical_speed_hold(&self.params, &cmds, state, vs_cmd);
        }

        if cmds.auto_throttle {
            state.throttle = speed_hold(&self.params, &cmds, state, dt);
        }
        Ok(())
    }
}
