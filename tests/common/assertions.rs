use flyer_fdm::utils::wrap_pi;
use flyer_fdm::PlayerState;

/// Assert that every quantity on the player is finite and physically sane
#[track_caller]
pub fn assert_state_valid(state: &PlayerState) {
    assert!(state.is_finite(), "state contains non-finite values: {:?}", state);
    assert!(state.mass > 0.0, "mass must be positive, got {}", state.mass);
    assert!(state.rho > 0.0, "density must be positive, got {}", state.rho);
    assert!(
        (0.0..=1.0).contains(&state.throttle),
        "throttle {} outside [0, 1]",
        state.throttle
    );
    assert!(
        (0.0..=1.0).contains(&state.engine_fraction),
        "engine fraction {} outside [0, 1]",
        state.engine_fraction
    );
    assert!(state.fuel >= 0.0, "fuel went negative: {}", state.fuel);
}

/// Assert two angles agree after wrapping their difference into [-pi, pi]
#[track_caller]
pub fn assert_angle_eq(actual: f64, expected: f64, tolerance: f64) {
    let error = wrap_pi(actual - expected);
    assert!(
        error.abs() <= tolerance,
        "angle {} differs from {} by {} (tolerance {})",
        actual,
        expected,
        error,
        tolerance
    );
}
