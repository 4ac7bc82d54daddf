mod module;
mod player;
mod scheduler;

pub use module::{Module, ModuleId};
pub use player::Player;
pub use scheduler::{ModuleScheduler, ScheduledModule};
