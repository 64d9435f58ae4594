//! Bloom Hunt - a timed flower-collection game in Bevy.
//!
//! Each session tiles the visible area with grass and hides flowers beneath
//! it. Find every flower before the timer runs out to move up a level; each
//! level packs the grid tighter, hides more flowers and gives less time.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, pausing
//! - **Config**: Tuning data loaded from RON
//! - **Difficulty**: Level counter and the curves derived from it
//! - **Pool**: Reusable sprite entities
//! - **Level**: Grid layout of obstacles and collectibles, camera
//! - **Session**: Countdown, victory and defeat
//! - **Input**: Click picking

pub mod config;
pub mod core;
pub mod difficulty;
pub mod input;
pub mod level;
pub mod pool;
pub mod session;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct BloomHuntPlugin;

impl Plugin for BloomHuntPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Tuning data and progression
            .add_plugins(config::ConfigPlugin)
            .add_plugins(difficulty::DifficultyPlugin)

            // Entity reuse
            .add_plugins(pool::PoolPlugin)

            // Level layout
            .add_plugins(level::LevelPlugin)

            // Session flow
            .add_plugins(session::SessionPlugin)

            // Player input
            .add_plugins(input::InputPlugin);
    }
}
