//! Difficulty curve - pure functions of the player's level.

use bevy::prelude::*;
use serde::Deserialize;

/// Tuning constants for the difficulty curve.
///
/// Every derived quantity is a pure function of an integer level starting
/// at 1. Levels below 1 are treated as level 1.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Collectibles spawned on level 1.
    pub base_collectible_count: u32,
    /// Additional collectibles per level.
    pub increase_collectible_count_per_level: u32,
    /// Session length on level 1, in seconds.
    pub base_time_duration: f32,
    /// Seconds removed per level.
    pub time_decay_per_level: f32,
    /// Floor for the session length.
    pub min_time_duration: f32,
    /// Grid cell size before any density increase, in world units.
    pub base_grid_cell_size: f32,
    /// Smallest cell size the grid can shrink to.
    pub min_grid_cell_size: f32,
    /// Cell size removed per level.
    pub density_step: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_collectible_count: 10,
            increase_collectible_count_per_level: 1,
            base_time_duration: 180.0,
            time_decay_per_level: 10.0,
            min_time_duration: 30.0,
            base_grid_cell_size: 1.5,
            min_grid_cell_size: 0.8,
            density_step: 0.1,
        }
    }
}

impl DifficultyConfig {
    /// Grid cell size for a level. Shrinks with level, never below the minimum.
    pub fn cell_size(&self, level: u32) -> f32 {
        let size = self.base_grid_cell_size - level.max(1) as f32 * self.density_step;
        size.max(self.min_grid_cell_size)
    }

    /// Session time limit in seconds for a level.
    pub fn time_limit(&self, level: u32) -> f32 {
        let time = self.base_time_duration - (level.max(1) - 1) as f32 * self.time_decay_per_level;
        time.max(self.min_time_duration)
    }

    /// Number of collectibles requested for a level.
    pub fn collectible_count(&self, level: u32) -> usize {
        let extra = (level.max(1) - 1).saturating_mul(self.increase_collectible_count_per_level);
        self.base_collectible_count.saturating_add(extra) as usize
    }
}

/// The player's current difficulty level (starts at 1).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyLevel(u32);

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl DifficultyLevel {
    pub fn current(&self) -> u32 {
        self.0
    }

    /// Advance by one level. Called on victory.
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Back to level 1.
    pub fn reset(&mut self) {
        self.0 = 1;
    }
}
