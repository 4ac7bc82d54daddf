use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::euler::Euler;

/// Attitude quaternion `(e0, ex, ey, ez)` rotating body axes into NED axes.
///
/// The quaternion is a working representation: integrators seed it from an
/// [`Euler`] attitude, advance it with [`Quaternion::qdot`], renormalise and
/// convert back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub e0: f64,
    pub ex: f64,
    pub ey: f64,
    pub ez: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub fn new(e0: f64, ex: f64, ey: f64, ez: f64) -> Self {
        Self { e0, ex, ey, ez }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Builds the attitude quaternion for a 3-2-1 (heading, pitch, roll) sequence.
    pub fn from_euler(euler: &Euler) -> Self {
        let (s_psi, c_psi) = (euler.psi * 0.5).sin_cos();
        let (s_theta, c_theta) = (euler.theta * 0.5).sin_cos();
        let (s_phi, c_phi) = (euler.phi * 0.5).sin_cos();

        Self {
            e0: c_phi * c_theta * c_psi + s_phi * s_theta * s_psi,
            ex: s_phi * c_theta * c_psi - c_phi * s_theta * s_psi,
            ey: c_phi * s_theta * c_psi + s_phi * c_theta * s_psi,
            ez: c_phi * c_theta * s_psi - s_phi * s_theta * c_psi,
        }
    }

    /// Recovers 3-2-1 Euler angles. Pitch is taken from a clamped `asin`, so
    /// at `theta = ±pi/2` heading and roll collapse into a single angle and
    /// the individual values returned are not unique.
    pub fn to_euler(&self) -> Euler {
        let Self { e0, ex, ey, ez } = *self;

        let sin_theta = (2.0 * (e0 * ey - ex * ez)).clamp(-1.0, 1.0);
        Euler {
            psi: (2.0 * (e0 * ez + ex * ey)).atan2(1.0 - 2.0 * (ey * ey + ez * ez)),
            theta: sin_theta.asin(),
            phi: (2.0 * (e0 * ex + ey * ez)).atan2(1.0 - 2.0 * (ex * ex + ey * ey)),
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.e0 * self.e0 + self.ex * self.ex + self.ey * self.ey + self.ez * self.ez).sqrt()
    }

    /// Scales the quaternion to unit length. A zero or non-finite quaternion
    /// carries no attitude information and is reset to identity.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag > f64::EPSILON && mag.is_finite() {
            self.e0 /= mag;
            self.ex /= mag;
            self.ey /= mag;
            self.ez /= mag;
        } else {
            warn!("Cannot normalize quaternion {:?}, resetting to identity", self);
            *self = Self::identity();
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Time derivative of the quaternion for body rates `(p, q, r)`.
    pub fn qdot(&self, pqr: &Vector3<f64>) -> Quaternion {
        let (p, q, r) = (pqr.x, pqr.y, pqr.z);
        Quaternion {
            e0: -0.5 * (self.ex * p + self.ey * q + self.ez * r),
            ex: 0.5 * (self.e0 * p + self.ey * r - self.ez * q),
            ey: 0.5 * (self.e0 * q + self.ez * p - self.ex * r),
            ez: 0.5 * (self.e0 * r + self.ex * q - self.ey * p),
        }
    }

    /// Component-wise sum, used to step the quaternion along `qdot`.
    pub fn add(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            e0: self.e0 + other.e0,
            ex: self.ex + other.ex,
            ey: self.ey + other.ey,
            ez: self.ez + other.ez,
        }
    }

    pub fn scale(&self, k: f64) -> Quaternion {
        Quaternion {
            e0: self.e0 * k,
            ex: self.ex * k,
            ey: self.ey * k,
            ez: self.ez * k,
        }
    }

    /// Hamilton product `self * other`. Order matters.
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            e0: self.e0 * other.e0 - self.ex * other.ex - self.ey * other.ey - self.ez * other.ez,
            ex: self.e0 * other.ex + self.ex * other.e0 + self.ey * other.ez - self.ez * other.ey,
            ey: self.e0 * other.ey - self.ex * other.ez + self.ey * other.e0 + self.ez * other.ex,
            ez: self.e0 * other.ez + self.ex * other.ey - self.ey * other.ex + self.ez * other.e0,
        }
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.e0, -self.ex, -self.ey, -self.ez)
    }

    /// Rotates a body-axis vector into NED axes.
    pub fn rotate(&self, body: &Vector3<f64>) -> Vector3<f64> {
        let v = Quaternion::new(0.0, body.x, body.y, body.z);
        let r = self.multiply(&v).multiply(&self.conjugate());
        Vector3::new(r.ex, r.ey, r.ez)
    }

    /// Rotates an NED vector into body axes.
    pub fn rotate_inverse(&self, ned: &Vector3<f64>) -> Vector3<f64> {
        self.conjugate().rotate(ned)
    }

    pub fn is_finite(&self) -> bool {
        self.e0.is_finite() && self.ex.is_finite() && self.ey.is_finite() && self.ez.is_finite()
    }
}

impl From<Quaternion> for UnitQuaternion<f64> {
    fn from(q: Quaternion) -> Self {
        UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q.e0, q.ex, q.ey, q.ez))
    }
}

impl From<UnitQuaternion<f64>> for Quaternion {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Quaternion::new(q.w, q.i, q.j, q.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::wrap_pi;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_euler_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let euler = Euler::new(
                rng.gen_range(-PI..PI),
                // stay clear of the gimbal singularity
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-PI..PI),
            );
            let back = Quaternion::from_euler(&euler).to_euler();

            assert_relative_eq!(wrap_pi(back.psi - euler.psi), 0.0, epsilon = 1e-9);
            assert_relative_eq!(back.theta, euler.theta, epsilon = 1e-9);
            assert_relative_eq!(wrap_pi(back.phi - euler.phi), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_gimbal_lock_keeps_pitch() {
        // heading and roll are not separable here, only pitch is well defined
        let euler = Euler::new(0.4, FRAC_PI_2, 0.1);
        let back = Quaternion::from_euler(&euler).to_euler();
        assert_relative_eq!(back.theta, FRAC_PI_2, epsilon = 1e-6);
        assert!(back.is_finite());
    }

    #[test]
    fn test_matches_nalgebra_convention() {
        let euler = Euler::new(0.7, -0.3, 0.2);
        let ours = Quaternion::from_euler(&euler);
        let theirs = UnitQuaternion::from_euler_angles(euler.phi, euler.theta, euler.psi);

        let v = Vector3::new(1.0, 2.0, -3.0);
        assert_relative_eq!(ours.rotate(&v), theirs * v, epsilon = 1e-12);
        assert_relative_eq!(ours.rotate_inverse(&ours.rotate(&v)), v, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let mut q = Quaternion::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            q.normalize();
            assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-12);
        }

        let mut zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        zero.normalize();
        assert_eq!(zero, Quaternion::identity());
    }

    #[test]
    fn test_qdot_integrates_pure_roll() {
        let roll_rate = 0.1;
        let pqr = Vector3::new(roll_rate, 0.0, 0.0);
        let dt = 0.001;

        let mut q = Quaternion::identity();
        for _ in 0..1000 {
            q = q.add(&q.qdot(&pqr).scale(dt)).normalized();
        }

        let euler = q.to_euler();
        assert_relative_eq!(euler.phi, roll_rate, epsilon = 1e-6);
        assert_relative_eq!(euler.theta, 0.0, epsilon = 1e-9);
        assert_relative_eq!(euler.psi, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_multiply_composes_rotations() {
        let yaw = Quaternion::from_euler(&Euler::new(0.5, 0.0, 0.0));
        let composed = yaw.multiply(&yaw).to_euler();
        assert_relative_eq!(composed.psi, 1.0, epsilon = 1e-12);

        let inverse = yaw.multiply(&yaw.conjugate());
        assert_relative_eq!(inverse.e0, 1.0, epsilon = 1e-12);
    }
}
