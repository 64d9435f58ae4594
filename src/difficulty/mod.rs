//! Difficulty module - level progression and the derived difficulty curve.

mod model;
mod plugin;

pub use model::{DifficultyConfig, DifficultyLevel};
pub use plugin::DifficultyPlugin;
