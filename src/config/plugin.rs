//! Config plugin - loads game data at startup.

use bevy::prelude::*;
use std::path::Path;

use super::data::{GameData, GAME_DATA_PATH};

/// Config plugin - reads `assets/data/game_data.ron` once at startup.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_game_data);
    }
}

/// Load game data into a resource.
///
/// A missing file falls back to built-in defaults. A broken file leaves the
/// resource absent so that level building reports a configuration error.
pub fn load_game_data(mut commands: Commands) {
    let path = Path::new(GAME_DATA_PATH);

    if !path.exists() {
        warn!("Game data file not found: {:?}, using defaults", path);
        commands.insert_resource(GameData::default());
        return;
    }

    match GameData::load(path) {
        Ok(data) => {
            info!(
                "Loaded game data: {} obstacle variants, {} collectible variants, {} pools",
                data.obstacle_variants.len(),
                data.collectible_variants.len(),
                data.pools.len()
            );
            commands.insert_resource(data);
        }
        Err(e) => {
            error!("{}", e);
        }
    }
}
