//! Game state definitions that control the flow between sessions.
//!
//! States determine which systems run at any given time. For example,
//! the session countdown only runs while a session is in progress and not
//! paused, while start/continue keys are only read outside of a session.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `MainMenu`
/// - Enter `InGame` when the player starts or continues
/// - Move to `Results` when a session is won or the timer runs out
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Title screen
    #[default]
    MainMenu,
    /// A session is in progress
    InGame,
    /// Session finished, waiting for the player
    Results,
}

/// Sub-states for a session - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Timer counting down, clicks collect
    #[default]
    Running,
    /// Timer frozen, clicks ignored
    Paused,
}
