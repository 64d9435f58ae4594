//! Pool plugin - creates the configured pools at startup.

use bevy::prelude::*;

use super::object_pool::{ObjectPool, PoolTemplate, ITEM_POOL_TAG};
use crate::config::{load_game_data, GameData};

/// Pool plugin - registers the pool resource and pre-spawns instances.
pub struct PoolPlugin;

impl Plugin for PoolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObjectPool>()
            .add_systems(Startup, configure_pools.after(load_game_data));
    }
}

/// Configure every pool listed in the game data.
pub fn configure_pools(
    mut commands: Commands,
    mut pool: ResMut<ObjectPool>,
    game_data: Option<Res<GameData>>,
) {
    let Some(game_data) = game_data else {
        warn!("No game data available, skipping pool setup");
        return;
    };

    for definition in &game_data.pools {
        pool.configure(
            &mut commands,
            &definition.tag,
            PoolTemplate::default(),
            definition.initial_capacity,
        );
    }

    // Levels cannot be built without the item pool
    if !pool.has_pool(ITEM_POOL_TAG) {
        warn!("Pool '{}' not listed in game data, growing on demand", ITEM_POOL_TAG);
        pool.configure(&mut commands, ITEM_POOL_TAG, PoolTemplate::default(), 0);
    }
}
