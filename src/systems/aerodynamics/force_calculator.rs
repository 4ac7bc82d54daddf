use nalgebra::{Matrix3, Vector3};

use crate::components::AeroCoefficients;

/// Rotation taking wind-axis vectors into body axes for the given angle of
/// attack and sideslip.
pub fn wind_to_body_matrix(alpha: f64, beta: f64) -> Matrix3<f64> {
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();

    Matrix3::new(
        ca * cb, -ca * sb, -sa, //
        sb, cb, 0.0, //
        sa * cb, -sa * sb, ca,
    )
}

/// Resolves wind-axis lift, drag and side force into body axes.
///
/// Drag acts along the negative wind x axis and lift along the negative wind
/// z axis, so a positive `cl` at zero alpha pushes the body upwards (negative
/// body z).
pub fn wind_to_body(
    coefficients: &AeroCoefficients,
    alpha: f64,
    beta: f64,
    qbar: f64,
    wing_area: f64,
) -> Vector3<f64> {
    let qs = qbar * wing_area;
    let wind_force = Vector3::new(
        -qs * coefficients.cd,
        qs * coefficients.cy,
        -qs * coefficients.cl,
    );

    wind_to_body_matrix(alpha, beta) * wind_force
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coefficients(cl: f64, cd: f64, cy: f64) -> AeroCoefficients {
        AeroCoefficients { cl, cd, cy }
    }

    #[test]
    fn test_zero_angles_is_identity() {
        let force = wind_to_body(&coefficients(0.5, 0.05, 0.0), 0.0, 0.0, 1000.0, 10.0);
        assert_relative_eq!(force, Vector3::new(-500.0, 0.0, -5000.0), epsilon = 1e-9);
    }

    #[test]
    fn test_lift_tilts_forward_with_alpha() {
        let alpha = 10.0_f64.to_radians();
        let force = wind_to_body(&coefficients(1.0, 0.0, 0.0), alpha, 0.0, 1.0, 1.0);

        // lift is perpendicular to the relative wind, so it gains a forward component
        assert_relative_eq!(force.x, alpha.sin(), epsilon = 1e-12);
        assert_relative_eq!(force.z, -alpha.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_drag_opposes_relative_wind() {
        let (alpha, beta) = (0.1, 0.05);
        let force = wind_to_body(&coefficients(0.0, 1.0, 0.0), alpha, beta, 1.0, 1.0);

        let relative_wind = Vector3::new(
            alpha.cos() * beta.cos(),
            beta.sin(),
            alpha.sin() * beta.cos(),
        );
        assert_relative_eq!(force, -relative_wind, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_is_orthonormal() {
        let m = wind_to_body_matrix(0.3, -0.2);
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }
}
