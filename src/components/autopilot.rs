use serde::{Deserialize, Serialize};

use super::Waypoint;

/// Autopilot setpoints, mode flags and envelope limits.
///
/// Written by the host and by the autopilot's own initialisation, read by
/// the autopilot every frame. Angles in radians, speeds in m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPilotCmds {
    /// Commanded heading, or ground track when the autopilot runs in track mode.
    pub heading: f64,
    pub altitude: f64,
    /// Commanded climb rate (positive up).
    pub vertical_speed: f64,
    pub speed: f64,
    pub mach: f64,

    pub altitude_hold: bool,
    pub vs_hold: bool,
    pub heading_hold: bool,
    pub orbit_hold: bool,
    /// Orbit direction while `orbit_hold` is set.
    pub orbit_right: bool,
    pub auto_throttle: bool,
    pub use_mach: bool,

    pub max_bank: f64,
    pub max_pitch: f64,
    pub min_pitch: f64,
    pub max_vs: f64,

    /// Set once the setpoints hold meaningful values, either from the host
    /// or captured from the current state on initialisation.
    pub captured: bool,
}

impl Default for AutoPilotCmds {
    fn default() -> Self {
        Self {
            heading: 0.0,
            altitude: 0.0,
            vertical_speed: 0.0,
            speed: 0.0,
            mach: 0.0,
            altitude_hold: false,
            vs_hold: false,
            heading_hold: false,
            orbit_hold: false,
            orbit_right: true,
            auto_throttle: false,
            use_mach: false,
            max_bank: 30.0_f64.to_radians(),
            max_pitch: 20.0_f64.to_radians(),
            min_pitch: -15.0_f64.to_radians(),
            max_vs: 10.0,
            captured: false,
        }
    }
}

impl AutoPilotCmds {
    /// Engages heading, altitude and speed hold on the given targets.
    pub fn hold(heading: f64, altitude: f64, speed: f64) -> Self {
        Self {
            heading,
            altitude,
            speed,
            heading_hold: true,
            altitude_hold: true,
            auto_throttle: true,
            captured: true,
            ..Default::default()
        }
    }

    /// Retargets the heading, altitude and speed holds onto a waypoint.
    pub fn steer_to(&mut self, waypoint: &Waypoint) {
        self.heading = waypoint.heading;
        self.altitude = waypoint.alt;
        self.speed = waypoint.speed;
        self.use_mach = false;
        self.captured = true;
    }
}
