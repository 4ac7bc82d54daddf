use approx::assert_relative_eq;
use flyer_fdm::config::ModuleConfig;
use flyer_fdm::systems::{EngineParams, EomFiveDof};
use flyer_fdm::utils::{Vector3, GRAVITY};
use flyer_fdm::{build_player, Module, Player, PlayerState};

use crate::common::{
    assert_state_valid, cruise_config, run_for, standard_modules, table_aero_module,
};

#[test]
fn test_gravity_only_tick() {
    let mut player = Player::new(PlayerState {
        alt: 1000.0,
        uvw: Vector3::new(100.0, 0.0, 0.0),
        auto_rudder: true,
        ..Default::default()
    });
    player
        .add_module(Box::new(EomFiveDof::default()), 0.0)
        .unwrap();
    player.initialize().unwrap();

    player.update(0.1).unwrap();

    assert_relative_eq!(player.state.ned_velocity.z, GRAVITY * 0.1, epsilon = 1e-9);
    assert_eq!(player.state.beta, 0.0);
    assert_eq!(player.frame(), 1);
    assert_state_valid(&player.state);
}

#[test]
fn test_cruise_holds_altitude_and_speed() {
    let mut player = build_player(&cruise_config()).unwrap();
    run_for(&mut player, 60.0, 0.01);

    let state = &player.state;
    assert_state_valid(state);
    assert!((state.alt - 1000.0).abs() < 25.0, "altitude drifted to {}", state.alt);
    assert!((state.v_inf - 50.0).abs() < 10.0, "airspeed drifted to {}", state.v_inf);
    assert!(state.fuel < 100.0);
    assert!(state.mass < 1000.0);
    assert!(state.north > 2000.0);
}

#[test]
fn test_table_aero_cruise_stays_finite() {
    let mut config = cruise_config();
    config.modules = standard_modules(table_aero_module());

    let mut player = build_player(&config).unwrap();
    run_for(&mut player, 30.0, 0.01);

    assert_state_valid(&player.state);
    assert!((player.state.alt - 1000.0).abs() < 50.0);
    assert!(player.state.coefficients.cl > 0.0);
}

#[test]
fn test_multi_rate_modules_share_state() {
    let mut config = cruise_config();
    if let ModuleConfig::Autopilot { rate, .. } = &mut config.modules[1] {
        *rate = 20.0;
    }
    let mut player = build_player(&config).unwrap();
    run_for(&mut player, 10.0, 0.01);

    assert_state_valid(&player.state);
    assert_eq!(player.frame(), 1000);
    assert_relative_eq!(player.sim_time(), 10.0, epsilon = 1e-9);
}

#[test]
fn test_fuel_exhaustion_shuts_down_engine() {
    let mut config = cruise_config();
    config.player.fuel = 0.05;
    let mut player = build_player(&config).unwrap();

    run_for(&mut player, 20.0, 0.01);

    let state = &player.state;
    assert_state_valid(state);
    assert_eq!(state.fuel, 0.0);
    assert_eq!(state.throttle, 0.0);
    assert_eq!(state.thrust, Vector3::zeros());
    assert_relative_eq!(state.mass, config.player.empty_mass);
}

#[test]
fn test_unpowered_descent_stops_at_ground() {
    let mut config = cruise_config();
    config.player.alt = 30.0;
    config.player.throttle = 0.0;
    if let Some(cmds) = config.player.autopilot.as_mut() {
        cmds.altitude = -500.0;
        cmds.auto_throttle = false;
    }
    config.modules[2] = ModuleConfig::Engine {
        rate: 0.0,
        params: EngineParams {
            track_fuel: false,
            ..Default::default()
        },
    };
    let mut player = build_player(&config).unwrap();

    run_for(&mut player, 60.0, 0.01);

    let state = &player.state;
    assert_state_valid(state);
    assert!(state.alt > -5.0, "vehicle sank to {} m", state.alt);
    assert!(state.vdown() <= 1e-9);
}

#[test]
fn test_runs_are_deterministic() {
    let mut first = build_player(&cruise_config()).unwrap();
    let mut second = build_player(&cruise_config()).unwrap();
    run_for(&mut first, 5.0, 0.01);
    run_for(&mut second, 5.0, 0.01);

    assert_eq!(first.state, second.state);
}

#[test]
fn test_module_trait_objects_are_named() {
    let eom = EomFiveDof::default();
    assert_eq!(eom.name(), "eom_five_dof");
}
