use flyer_fdm::build_player;
use flyer_fdm::components::Waypoint;

use crate::common::{assert_angle_eq, assert_state_valid, cruise_config, run_for};

#[test]
fn test_heading_change_is_captured() {
    let mut config = cruise_config();
    if let Some(cmds) = config.player.autopilot.as_mut() {
        cmds.heading = 30.0_f64.to_radians();
    }
    let mut player = build_player(&config).unwrap();

    let mut max_bank: f64 = 0.0;
    for _ in 0..60 {
        run_for(&mut player, 1.0, 0.01);
        max_bank = max_bank.max(player.state.euler.phi.abs());
    }

    let state = &player.state;
    assert_state_valid(state);
    assert_angle_eq(state.euler.psi, 30.0_f64.to_radians(), 2.0_f64.to_radians());
    assert!(max_bank <= state.ap_cmds.max_bank + 1e-3, "bank reached {}", max_bank);
    assert!(state.euler.phi.abs() < 2.0_f64.to_radians());
    assert!((state.alt - 1000.0).abs() < 25.0);
}

#[test]
fn test_climb_to_new_altitude() {
    let mut config = cruise_config();
    if let Some(cmds) = config.player.autopilot.as_mut() {
        cmds.altitude = 1200.0;
    }
    let mut player = build_player(&config).unwrap();

    let mut max_climb: f64 = 0.0;
    for _ in 0..90 {
        run_for(&mut player, 1.0, 0.01);
        max_climb = max_climb.max(player.state.climb_rate());
    }

    let state = &player.state;
    assert_state_valid(state);
    assert!((state.alt - 1200.0).abs() < 20.0, "altitude {}", state.alt);
    assert!(max_climb <= state.ap_cmds.max_vs * 1.5, "climb rate reached {}", max_climb);
}

#[test]
fn test_orbit_hold_turns_continuously() {
    let mut config = cruise_config();
    if let Some(cmds) = config.player.autopilot.as_mut() {
        cmds.orbit_hold = true;
        cmds.orbit_right = true;
    }
    let mut player = build_player(&config).unwrap();

    run_for(&mut player, 5.0, 0.01);
    let early = player.state.euler.psi;
    run_for(&mut player, 5.0, 0.01);

    let state = &player.state;
    assert_state_valid(state);
    assert!(state.euler.phi > 0.0);
    // a right orbit keeps the heading increasing
    assert!(flyer_fdm::utils::wrap_pi(state.euler.psi - early) > 0.0);
    assert!(state.pqr.z > 0.0);
}

#[test]
fn test_steer_to_waypoint_retargets_holds() {
    let mut player = build_player(&cruise_config()).unwrap();
    run_for(&mut player, 2.0, 0.01);

    let waypoint = Waypoint::new(0.0, 0.0, 1100.0, 55.0, -0.3);
    player.state.ap_cmds.steer_to(&waypoint);
    run_for(&mut player, 90.0, 0.01);

    let state = &player.state;
    assert_state_valid(state);
    assert_angle_eq(state.euler.psi, -0.3, 2.0_f64.to_radians());
    assert!((state.alt - 1100.0).abs() < 20.0);
    assert!((state.v_inf - 55.0).abs() < 5.0);
}
