use flyer_fdm::components::AutoPilotCmds;
use flyer_fdm::config::{ModuleConfig, PlayerConfig};
use flyer_fdm::resources::{Table2D, Table3D};
use flyer_fdm::systems::{
    AutopilotParams, CalibrationPoint, EngineParams, EomParams, LinearAeroParams, TableAero,
};
use flyer_fdm::{Player, SimulationConfig};

/// Cruise and climb conditions of a light single-engine aircraft
pub fn light_aircraft_calibration() -> Vec<CalibrationPoint> {
    vec![
        CalibrationPoint {
            alpha: 0.03,
            mach: 0.15,
            cl: 0.35,
            cd: 0.03,
        },
        CalibrationPoint {
            alpha: 0.10,
            mach: 0.12,
            cl: 0.80,
            cd: 0.06,
        },
    ]
}

pub fn linear_aero_module() -> ModuleConfig {
    ModuleConfig::LinearAero {
        rate: 0.0,
        params: LinearAeroParams {
            calibration: light_aircraft_calibration(),
            ..Default::default()
        },
    }
}

/// Tables equivalent to a lift slope of 6.4 per radian and a parabolic polar
pub fn table_aero_module() -> ModuleConfig {
    let lift_page = Table2D::new(
        vec![0.0, 5_000.0],
        vec![-0.2, 0.3],
        vec![0.154 - 1.28, 0.154 + 1.92, 0.154 - 1.28, 0.154 + 1.92],
    )
    .unwrap();
    let drag_page = Table2D::new(
        vec![0.0],
        vec![0.0, 0.25, 0.5, 1.0, 2.0],
        vec![0.0227, 0.0264, 0.0373, 0.0812, 0.2567],
    )
    .unwrap();
    let idle = Table2D::new(vec![0.0, 5_000.0], vec![0.0, 0.3], vec![0.0; 4]).unwrap();
    let full = Table2D::new(
        vec![0.0, 5_000.0],
        vec![0.0, 0.3],
        vec![2500.0, 2300.0, 1900.0, 1750.0],
    )
    .unwrap();

    ModuleConfig::TableAero {
        rate: 0.0,
        tables: TableAero::new(
            Table3D::new(vec![0.0], vec![lift_page]).unwrap(),
            Table3D::new(vec![0.0], vec![drag_page]).unwrap(),
            Table3D::new(vec![0.0, 1.0], vec![idle, full]).unwrap(),
            Table3D::constant(0.015),
        ),
    }
}

/// Aero, autopilot, engine and EOM in the order they must run each tick
pub fn standard_modules(aero: ModuleConfig) -> Vec<ModuleConfig> {
    vec![
        aero,
        ModuleConfig::Autopilot {
            rate: 0.0,
            params: AutopilotParams::default(),
        },
        ModuleConfig::Engine {
            rate: 0.0,
            params: EngineParams::default(),
        },
        ModuleConfig::Eom {
            rate: 0.0,
            params: EomParams::default(),
        },
    ]
}

/// Level cruise at 1000 m and 50 m/s holding heading, altitude and speed
pub fn cruise_config() -> SimulationConfig {
    SimulationConfig {
        frame_rate: 100.0,
        player: PlayerConfig {
            alt: 1000.0,
            speed: 50.0,
            throttle: 0.33,
            autopilot: Some(AutoPilotCmds::hold(0.0, 1000.0, 50.0)),
            ..Default::default()
        },
        modules: standard_modules(linear_aero_module()),
        ..Default::default()
    }
}

/// Steps the player forward for `seconds` of simulated time
pub fn run_for(player: &mut Player, seconds: f64, dt: f64) {
    let steps = (seconds / dt).round() as usize;
    for _ in 0..steps {
        player.update(dt).expect("simulation step failed");
    }
}
