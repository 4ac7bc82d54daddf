use std::io::Write;

use flyer_fdm::config::ModuleConfig;
use flyer_fdm::resources::{EarthModel, WindConfig};
use flyer_fdm::{build_player, SimError, SimulationConfig};
use pretty_assertions::assert_eq;

use crate::common::{assert_state_valid, cruise_config, run_for};

const CONFIG: &str = r#"
frame_rate: 100
environment:
  wind:
    type: bearing
    speed: 8.0
    bearing: 1.5707963267948966
  earth_model: Spherical
player:
  alt: 2000
  speed: 55
  throttle: 0.4
  fuel: 80
  autopilot:
    heading: 0.0
    altitude: 2000
    speed: 55
    heading_hold: true
    altitude_hold: true
    auto_throttle: true
    captured: true
modules:
  - type: inverse_design
    params:
      trim:
        - { mach: 0.17, altitude: 2000, alpha: 0.05, gamma: 0.0, mass: 980, thrust: 900 }
        - { mach: 0.13, altitude: 2000, alpha: 0.11, gamma: 0.08, mass: 980, thrust: 2000 }
  - type: autopilot
  - type: engine
  - type: eom
    params:
      max_angular_velocity: 5.0
"#;

#[test]
fn test_yaml_file_builds_and_flies() {
    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.environment.earth_model, EarthModel::Spherical);
    assert!(matches!(config.environment.wind, WindConfig::Bearing { .. }));

    let mut player = build_player(&config).unwrap();
    assert_eq!(
        player.module_names(),
        vec!["inverse_design", "autopilot", "engine", "eom_five_dof"]
    );

    let dt = config.timestep().unwrap();
    run_for(&mut player, 20.0, dt);

    let state = &player.state;
    assert_state_valid(state);
    // wind from the east drifts the vehicle west
    assert!(state.east < 0.0);
    assert!(state.lon < 0.0);
    assert!((state.alt - 2000.0).abs() < 50.0);
}

#[test]
fn test_json_round_trip_of_fixture() {
    let config = cruise_config();
    let json = serde_json::to_string_pretty(&config).unwrap();

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    assert_eq!(SimulationConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn test_degenerate_calibration_fails_the_build() {
    let mut config = cruise_config();
    config.modules[0] = ModuleConfig::InverseDesign {
        rate: 0.0,
        params: Default::default(),
    };

    match build_player(&config) {
        Err(SimError::Module { name, .. }) => assert_eq!(name, "inverse_design"),
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("empty trim set should not calibrate"),
    }
}
