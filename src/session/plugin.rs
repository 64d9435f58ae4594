//! Session plugin - runs a timed session from start to results.

use bevy::prelude::*;

use super::timer::SessionTimer;
use crate::config::GameData;
use crate::core::{AllCollected, GameState, PlayState, SessionEnded, SessionOutcome};
use crate::difficulty::DifficultyLevel;
use crate::level::{setup_level, LevelLayout};

/// Session plugin - timer, win/lose handling and the start/quit keys.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionTimer>()
            .add_systems(OnEnter(GameState::InGame), start_session.after(setup_level))
            .add_systems(
                Update,
                (
                    handle_all_collected,
                    tick_session_timer.run_if(in_state(PlayState::Running)),
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (
                    handle_menu_input.run_if(in_state(GameState::MainMenu)),
                    handle_results_input.run_if(in_state(GameState::Results)),
                    handle_quit_input.run_if(in_state(PlayState::Paused)),
                    log_session_ended,
                ),
            );
    }
}

/// Start the countdown once the level is built.
///
/// A level with nothing to find cannot be won, so the session is abandoned.
fn start_session(
    mut timer: ResMut<SessionTimer>,
    mut next_state: ResMut<NextState<GameState>>,
    layout: Res<LevelLayout>,
    level: Res<DifficultyLevel>,
    game_data: Option<Res<GameData>>,
) {
    let collectibles = layout.collectible_count();
    let Some(game_data) = game_data.filter(|_| collectibles > 0) else {
        error!(
            "Level {} has no collectibles, returning to the main menu",
            level.current()
        );
        timer.stop();
        next_state.set(GameState::MainMenu);
        return;
    };

    let limit = game_data.difficulty.time_limit(level.current());
    timer.start(limit);
    info!(
        "Level {}: find {} flowers in {:.0} seconds",
        level.current(),
        collectibles,
        limit
    );
}

/// Victory: stop the clock and move up a level.
fn handle_all_collected(
    mut events: EventReader<AllCollected>,
    mut timer: ResMut<SessionTimer>,
    mut level: ResMut<DifficultyLevel>,
    mut ended: EventWriter<SessionEnded>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if events.read().count() == 0 || !timer.is_running() {
        return;
    }

    timer.stop();
    ended.send(SessionEnded {
        outcome: SessionOutcome::Victory,
        level: level.current(),
    });
    level.increment();
    next_state.set(GameState::Results);
}

/// Count down and end the session when time is up.
fn tick_session_timer(
    time: Res<Time>,
    mut timer: ResMut<SessionTimer>,
    level: Res<DifficultyLevel>,
    mut ended: EventWriter<SessionEnded>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let before = timer.remaining();
    let expired = timer.tick(time.delta_secs());

    if expired {
        ended.send(SessionEnded {
            outcome: SessionOutcome::Defeat,
            level: level.current(),
        });
        next_state.set(GameState::Results);
    } else if (before / 10.0).ceil() > (timer.remaining() / 10.0).ceil() {
        info!("{:.0} seconds left", timer.remaining().ceil());
    }
}

/// Space starts a session, R resets progress.
fn handle_menu_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut level: ResMut<DifficultyLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        level.reset();
        info!("Progress reset to level 1");
    }
    if keyboard.just_pressed(KeyCode::Space) {
        next_state.set(GameState::InGame);
    }
}

/// Space plays the next session, Escape goes back to the menu.
fn handle_results_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        next_state.set(GameState::InGame);
    } else if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::MainMenu);
    }
}

/// Q while paused abandons the session.
fn handle_quit_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut timer: ResMut<SessionTimer>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        info!("Session abandoned");
        timer.stop();
        next_state.set(GameState::MainMenu);
    }
}

fn log_session_ended(mut events: EventReader<SessionEnded>) {
    for event in events.read() {
        match event.outcome {
            SessionOutcome::Victory => info!("Level {} cleared!", event.level),
            SessionOutcome::Defeat => info!("Time's up on level {}", event.level),
        }
    }
}
