use tracing::{debug, info};

use super::{Module, ModuleId};
use crate::components::PlayerState;
use crate::utils::{Result, SimError};

/// A registered module together with its cadence bookkeeping.
pub struct ScheduledModule {
    module: Box<dyn Module>,
    frame_time: f64,
    last_time: f64,
}

impl ScheduledModule {
    fn new(module: Box<dyn Module>, rate: f64) -> Self {
        let frame_time = if rate > 0.0 { 1.0 / rate } else { 0.0 };
        Self {
            module,
            frame_time,
            last_time: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        self.module.name()
    }

    /// Seconds between updates; zero runs the module every tick.
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }
}

/// Owns the player's modules and runs them in registration order.
#[derive(Default)]
pub struct ModuleScheduler {
    modules: Vec<ScheduledModule>,
}

impl ModuleScheduler {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    pub fn insert_module(&mut self, module: Box<dyn Module>, rate: f64) -> Result<ModuleId> {
        if !rate.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "module '{}' has non-finite rate {}",
                module.name(),
                rate
            )));
        }

        let id = ModuleId(self.modules.len());
        let scheduled = ScheduledModule::new(module, rate);
        info!(
            "Registered module '{}' at {} Hz (frame time {:.4} s)",
            scheduled.name(),
            rate,
            scheduled.frame_time
        );
        self.modules.push(scheduled);
        Ok(id)
    }

    pub fn get(&self, id: ModuleId) -> Option<&ScheduledModule> {
        self.modules.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &ScheduledModule)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, module)| (ModuleId(i), module))
    }

    pub fn initialize_modules(&mut self, state: &mut PlayerState) -> Result<()> {
        for scheduled in &mut self.modules {
            let module = &mut scheduled.module;
            module
                .initialize(state)
                .map_err(|e| SimError::in_module(module.name(), e))?;
            debug!("Initialized module '{}'", module.name());
        }
        Ok(())
    }

    /// Runs every module whose cadence has elapsed at `sim_time`, passing
    /// the time since its previous run rather than the outer step.
    pub fn run_due(&mut self, state: &mut PlayerState, sim_time: f64) -> Result<()> {
        for scheduled in &mut self.modules {
            let elapsed = sim_time - scheduled.last_time;
            if elapsed >= scheduled.frame_time {
                scheduled.last_time = sim_time;
                let module = &mut scheduled.module;
                module
                    .update(state, elapsed)
                    .map_err(|e| SimError::in_module(module.name(), e))?;
            }
        }
        Ok(())
    }
}
