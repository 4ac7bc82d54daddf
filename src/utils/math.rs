use nalgebra::Vector3;
use std::f64::consts::PI;

/// Wrap an angle into [-pi, pi].
pub fn wrap_pi(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    // rem_euclid maps +pi onto -pi, keep the sign of the input at the boundary
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Flight path angle from an NED velocity vector (positive climbing).
pub fn flight_path_angle(velocity_ned: &Vector3<f64>) -> f64 {
    -velocity_ned
        .z
        .atan2((velocity_ned.x.powi(2) + velocity_ned.y.powi(2)).sqrt())
}

/// Ground track from an NED velocity vector, clockwise from north.
pub fn ground_track(velocity_ned: &Vector3<f64>) -> f64 {
    velocity_ned.y.atan2(velocity_ned.x)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Locates `x` on an increasing breakpoint axis.
///
/// Returns the lower bracketing index and the fractional position inside the
/// bracket. Queries outside the axis clamp to the nearest edge, so the
/// fraction is always within [0, 1] and `index + 1` is a valid index whenever
/// the axis has more than one point.
pub fn bracket(axis: &[f64], x: f64) -> (usize, f64) {
    let n = axis.len();
    if n < 2 || x.is_nan() || x <= axis[0] {
        return (0, 0.0);
    }
    if x >= axis[n - 1] {
        return (n - 2, 1.0);
    }

    // first index whose breakpoint is strictly above x
    let upper = axis.partition_point(|&v| v <= x).clamp(1, n - 1);
    let lower = upper - 1;
    let span = axis[upper] - axis[lower];
    let fraction = if span.abs() > f64::EPSILON {
        ((x - axis[lower]) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (lower, fraction)
}

/// One-dimensional clamped interpolation of `values` sampled on `axis`.
pub fn interp1(axis: &[f64], values: &[f64], x: f64) -> f64 {
    debug_assert_eq!(axis.len(), values.len());
    match values.len() {
        0 => 0.0,
        1 => values[0],
        _ => {
            let (i, t) = bracket(axis, x);
            lerp(values[i], values[i + 1], t)
        }
    }
}

/// `result = a x b`
#[inline]
pub fn cross_into(a: &Vector3<f64>, b: &Vector3<f64>, result: &mut Vector3<f64>) {
    *result = a.cross(b);
}

/// `result = a + b`
#[inline]
pub fn add_into(a: &Vector3<f64>, b: &Vector3<f64>, result: &mut Vector3<f64>) {
    *result = a + b;
}

/// `result = a - b`
#[inline]
pub fn sub_into(a: &Vector3<f64>, b: &Vector3<f64>, result: &mut Vector3<f64>) {
    *result = a - b;
}

/// `result = a * k`
#[inline]
pub fn scale_into(a: &Vector3<f64>, k: f64, result: &mut Vector3<f64>) {
    *result = a * k;
}
