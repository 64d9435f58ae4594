//! Difficulty plugin - owns the current level.

use bevy::prelude::*;

use super::model::DifficultyLevel;

/// Difficulty plugin - registers the level counter.
///
/// The counter is only written by the session on victory and by an
/// explicit progress reset.
pub struct DifficultyPlugin;

impl Plugin for DifficultyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DifficultyLevel>();
    }
}
