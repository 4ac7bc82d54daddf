use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Steady wind, expressed in NED axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindConfig {
    Constant {
        velocity: Vector3<f64>,
    },
    /// Wind of `speed` (m/s) blowing FROM `bearing` (rad, clockwise from north).
    Bearing {
        speed: f64,
        bearing: f64,
    },
}

impl Default for WindConfig {
    fn default() -> Self {
        WindConfig::Constant {
            velocity: Vector3::zeros(),
        }
    }
}

impl WindConfig {
    pub fn velocity_ned(&self) -> Vector3<f64> {
        match self {
            WindConfig::Constant { velocity } => *velocity,
            WindConfig::Bearing { speed, bearing } => {
                // air moves towards the reciprocal of the bearing it comes from
                Vector3::new(-speed * bearing.cos(), -speed * bearing.sin(), 0.0)
            }
        }
    }
}
