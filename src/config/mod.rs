//! Config module - tuning data for levels, variants and pools.

mod data;
mod error;
mod plugin;

pub use data::{GameData, LayoutConfig, PoolDefinition, SpawnableVariant, GAME_DATA_PATH};
pub use error::ConfigError;
pub use plugin::{load_game_data, ConfigPlugin};
