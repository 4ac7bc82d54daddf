use std::fmt;

use tracing::info;

use super::{Module, ModuleId, ModuleScheduler};
use crate::components::PlayerState;
use crate::utils::{Result, SimError};

/// The simulated vehicle: its state plus the modules that advance it.
///
/// `update` moves simulated time forward and dispatches every module whose
/// cadence has elapsed, in the order the modules were added. Order matters:
/// force producers must be registered before the integrator that consumes
/// their output.
#[derive(Default)]
pub struct Player {
    pub state: PlayerState,
    scheduler: ModuleScheduler,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("modules", &self.module_names())
            .field("state", &self.state)
            .finish()
    }
}

impl Player {
    pub fn new(state: PlayerState) -> Self {
        Self {
            state,
            scheduler: ModuleScheduler::new(),
        }
    }

    /// Registers a module to run at `rate` Hz. A rate of zero (or below)
    /// runs the module on every tick.
    pub fn add_module(&mut self, module: Box<dyn Module>, rate: f64) -> Result<ModuleId> {
        self.scheduler.insert_module(module, rate)
    }

    /// Runs every module's one-time initialisation in registration order.
    pub fn initialize(&mut self) -> Result<()> {
        self.scheduler.initialize_modules(&mut self.state)?;
        info!(
            "Player initialized with {} modules: {:?}",
            self.scheduler.len(),
            self.module_names()
        );
        Ok(())
    }

    /// Advances simulated time by `timestep` seconds.
    pub fn update(&mut self, timestep: f64) -> Result<()> {
        if !timestep.is_finite() || timestep < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "timestep must be finite and non-negative, got {}",
                timestep
            )));
        }

        self.state.sim_time += timestep;
        let sim_time = self.state.sim_time;
        self.scheduler.run_due(&mut self.state, sim_time)?;
        self.state.frame += 1;
        Ok(())
    }

    pub fn sim_time(&self) -> f64 {
        self.state.sim_time
    }

    pub fn frame(&self) -> u64 {
        self.state.frame
    }

    pub fn module_count(&self) -> usize {
        self.scheduler.len()
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.scheduler.iter().map(|(_, m)| m.name()).collect()
    }

    pub fn scheduler(&self) -> &ModuleScheduler {
        &self.scheduler
    }
}
