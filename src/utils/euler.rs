use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::GIMBAL_EPSILON;

/// Attitude as 3-2-1 Euler angles in radians.
///
/// `psi` is heading (positive clockwise from north), `theta` is pitch
/// (positive nose up) and `phi` is roll (positive right wing down).
///
/// The representation is singular at `theta = ±pi/2`: heading and roll are
/// no longer independent and the heading-rate term of [`Euler::euler_rates`]
/// divides by `cos(theta)`. That division is floored at `GIMBAL_EPSILON`, so
/// results near the singularity are finite but not meaningful.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub psi: f64,
    pub theta: f64,
    pub phi: f64,
}

impl Euler {
    pub fn new(psi: f64, theta: f64, phi: f64) -> Self {
        Self { psi, theta, phi }
    }

    /// Reinterprets a vector laid out as (heading, pitch, roll).
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.psi, self.theta, self.phi)
    }

    /// Converts body rates (p, q, r) into Euler angle rates, returned as
    /// (psi_dot, theta_dot, phi_dot).
    pub fn euler_rates(&self, pqr: &Vector3<f64>) -> Euler {
        let (p, q, r) = (pqr.x, pqr.y, pqr.z);
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let cos_theta = guarded_cos(self.theta);
        let tan_theta = self.theta.sin() / cos_theta;

        Euler {
            psi: (q * sin_phi + r * cos_phi) / cos_theta,
            theta: q * cos_phi - r * sin_phi,
            phi: p + (q * sin_phi + r * cos_phi) * tan_theta,
        }
    }

    /// Converts Euler angle rates back into body rates (p, q, r).
    pub fn body_rates(&self, rates: &Euler) -> Vector3<f64> {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();

        Vector3::new(
            rates.phi - rates.psi * sin_theta,
            rates.theta * cos_phi + rates.psi * cos_theta * sin_phi,
            rates.psi * cos_theta * cos_phi - rates.theta * sin_phi,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.psi.is_finite() && self.theta.is_finite() && self.phi.is_finite()
    }
}

fn guarded_cos(theta: f64) -> f64 {
    let c = theta.cos();
    if c.abs() < GIMBAL_EPSILON {
        debug!("Euler rate conversion at gimbal singularity, theta = {}", theta);
        GIMBAL_EPSILON.copysign(c)
    } else {
        c
    }
}
