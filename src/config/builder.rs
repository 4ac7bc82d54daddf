use tracing::info;

use super::SimulationConfig;
use crate::sim::Player;
use crate::utils::Result;

/// Assembles a player from a configuration: seeds the initial state,
/// registers the modules in configuration order and runs their
/// initialisation.
pub fn build_player(config: &SimulationConfig) -> Result<Player> {
    config.timestep()?;

    let state = config.player.initial_state(&config.environment);
    let mut player = Player::new(state);

    for module in &config.modules {
        player.add_module(module.build(config), module.rate())?;
    }
    player.initialize()?;

    info!(
        "Built player at {:.1} m, {:.1} m/s with {} modules",
        player.state.alt,
        player.state.v_inf,
        player.module_count()
    );
    Ok(player)
}
