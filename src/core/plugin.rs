//! Core plugin that sets up game states, events, and pausing.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (MainMenu, InGame, Results) and the pause sub-state
/// - Global events (ItemCollected, AllCollected, SessionEnded)
/// - Pause toggling
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<ItemCollected>()
            .add_event::<AllCollected>()
            .add_event::<SessionEnded>()

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            );
    }
}

/// Handle Escape key to pause/unpause the session.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => {
                info!("Paused");
                next_state.set(PlayState::Paused);
            }
            PlayState::Paused => {
                info!("Resumed");
                next_state.set(PlayState::Running);
            }
        }
    }
}
