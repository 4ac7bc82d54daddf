use crate::components::PlayerState;
use crate::utils::Result;

/// A unit of simulation work driven by the [`Player`](super::Player) at its
/// own cadence.
///
/// Modules own no physical state. Everything they read or produce lives on
/// the `PlayerState` passed to each call.
pub trait Module {
    fn name(&self) -> &str;

    /// One-time setup once the player state has been configured. Calibration
    /// failures are reported here.
    fn initialize(&mut self, _state: &mut PlayerState) -> Result<()> {
        Ok(())
    }

    /// Advance by `dt`, the time elapsed since this module last ran.
    fn update(&mut self, state: &mut PlayerState, dt: f64) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(pub(crate) usize);
