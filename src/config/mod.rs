mod builder;

pub use builder::build_player;

use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{AircraftGeometry, AutoPilotCmds, PlayerState};
use crate::resources::{Atmosphere, EnvironmentConfig};
use crate::systems::{
    AeroModule, Autopilot, AutopilotParams, Engine, EngineParams, EomFiveDof, EomParams,
    InverseDesign, InverseDesignParams, LinearAero, LinearAeroParams, TableAero,
};
use crate::sim::Module;
use crate::utils::{Euler, Quaternion, Result, SimError};

/// Top-level description of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Host stepping rate (Hz)
    pub frame_rate: f64,
    pub environment: EnvironmentConfig,
    pub player: PlayerConfig,
    /// Modules in the order they run each tick.
    pub modules: Vec<ModuleConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_rate: 100.0,
            environment: EnvironmentConfig::default(),
            player: PlayerConfig::default(),
            modules: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Loads a configuration file, choosing JSON or YAML by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            other => Err(SimError::InvalidConfig(format!(
                "unsupported config extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn has_engine(&self) -> bool {
        self.modules
            .iter()
            .any(|module| matches!(module, ModuleConfig::Engine { .. }))
    }

    /// Outer timestep the host should advance the player by.
    pub fn timestep(&self) -> Result<f64> {
        if self.frame_rate > 0.0 && self.frame_rate.is_finite() {
            Ok(1.0 / self.frame_rate)
        } else {
            Err(SimError::InvalidConfig(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )))
        }
    }
}

/// Initial condition of the vehicle. Angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub ground_alt: f64,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    /// True airspeed along the body x axis (m/s)
    pub speed: f64,
    pub empty_mass: f64,
    pub fuel: f64,
    pub geometry: AircraftGeometry,
    pub throttle: f64,
    pub auto_rudder: bool,
    pub autopilot: Option<AutoPilotCmds>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lat: 0.0,
            lon: 0.0,
            alt: 1000.0,
            ground_alt: 0.0,
            heading: 0.0,
            pitch: 0.0,
            roll: 0.0,
            speed: 50.0,
            empty_mass: 900.0,
            fuel: 100.0,
            geometry: AircraftGeometry::default(),
            throttle: 0.5,
            auto_rudder: true,
            autopilot: None,
        }
    }
}

impl PlayerConfig {
    /// State at the start of the run, with air data seeded from the
    /// environment so every module initializes against consistent values.
    pub fn initial_state(&self, environment: &EnvironmentConfig) -> PlayerState {
        let air = Atmosphere::new(environment.atmosphere.clone()).properties(self.alt);
        let euler = Euler::new(self.heading, self.pitch, self.roll);
        let uvw = Vector3::new(self.speed, 0.0, 0.0);
        let wind = environment.wind.velocity_ned();

        PlayerState {
            lat: self.lat,
            lon: self.lon,
            alt: self.alt,
            ground_alt: self.ground_alt,
            euler,
            uvw,
            ned_velocity: Quaternion::from_euler(&euler).rotate(&uvw) + wind,
            v_inf: self.speed.abs(),
            rho: air.density,
            speed_of_sound: air.speed_of_sound,
            mach: self.speed.abs() / air.speed_of_sound,
            qbar: 0.5 * air.density * self.speed * self.speed,
            throttle: self.throttle.clamp(0.0, 1.0),
            engine_fraction: self.throttle.clamp(0.0, 1.0),
            empty_mass: self.empty_mass,
            fuel: self.fuel,
            mass: self.empty_mass + self.fuel,
            wing_area: self.geometry.wing_area,
            wind,
            earth_model: environment.earth_model,
            auto_rudder: self.auto_rudder,
            ap_cmds: self.autopilot.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// One scheduled module and its update rate (Hz, zero runs every tick).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleConfig {
    LinearAero {
        #[serde(default)]
        rate: f64,
        #[serde(default)]
        params: LinearAeroParams,
    },
    InverseDesign {
        #[serde(default)]
        rate: f64,
        #[serde(default)]
        params: InverseDesignParams,
    },
    TableAero {
        #[serde(default)]
        rate: f64,
        tables: TableAero,
    },
    Autopilot {
        #[serde(default)]
        rate: f64,
        #[serde(default)]
        params: AutopilotParams,
    },
    Engine {
        #[serde(default)]
        rate: f64,
        #[serde(default)]
        params: EngineParams,
    },
    Eom {
        #[serde(default)]
        rate: f64,
        #[serde(default)]
        params: EomParams,
    },
}

impl ModuleConfig {
    pub fn rate(&self) -> f64 {
        match self {
            ModuleConfig::LinearAero { rate, .. }
            | ModuleConfig::InverseDesign { rate, .. }
            | ModuleConfig::TableAero { rate, .. }
            | ModuleConfig::Autopilot { rate, .. }
            | ModuleConfig::Engine { rate, .. }
            | ModuleConfig::Eom { rate, .. } => *rate,
        }
    }

    /// Copy of this module with the environment's atmosphere and the player's
    /// airframe in place of any per-module values, so calibration and flight
    /// see the same air and the same wing.
    pub fn shared_with(
        &self,
        environment: &EnvironmentConfig,
        geometry: &AircraftGeometry,
    ) -> ModuleConfig {
        let mut module = self.clone();
        match &mut module {
            ModuleConfig::LinearAero { params, .. } => params.geometry = geometry.clone(),
            ModuleConfig::InverseDesign { params, .. } => {
                params.aero.geometry = geometry.clone();
                params.atmosphere = environment.atmosphere.clone();
            }
            ModuleConfig::Eom { params, .. } => params.atmosphere = environment.atmosphere.clone(),
            ModuleConfig::TableAero { .. }
            | ModuleConfig::Autopilot { .. }
            | ModuleConfig::Engine { .. } => {}
        }
        module
    }

    /// Instantiates the module against the rest of `config`. Aero modules
    /// read the spooled engine fraction only when an engine module is
    /// configured to produce it.
    pub fn build(&self, config: &SimulationConfig) -> Box<dyn Module> {
        let spooled = config.has_engine();
        match self.shared_with(&config.environment, &config.player.geometry) {
            ModuleConfig::LinearAero { params, .. } => Box::new(
                AeroModule::new("linear_aero", LinearAero::new(params)).with_spooled_engine(spooled),
            ),
            ModuleConfig::InverseDesign { params, .. } => Box::new(
                AeroModule::new("inverse_design", InverseDesign::new(params))
                    .with_spooled_engine(spooled),
            ),
            ModuleConfig::TableAero { tables, .. } => {
                Box::new(AeroModule::new("table_aero", tables).with_spooled_engine(spooled))
            }
            ModuleConfig::Autopilot { params, .. } => Box::new(Autopilot::new(params)),
            ModuleConfig::Engine { params, .. } => Box::new(Engine::new(params)),
            ModuleConfig::Eom { params, .. } => Box::new(EomFiveDof::new(params)),
        }
    }
}
