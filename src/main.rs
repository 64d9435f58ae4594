//! Bloom Hunt - Entry Point
//!
//! Find every flower hidden in the grass before time runs out.
//!
//! Controls:
//! - Space: Start / next session
//! - Left click: Collect a flower
//! - Escape: Pause/Unpause (back to menu from results)
//! - Q: Quit to menu while paused
//! - R: Reset progress on the main menu

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bloom Hunt".to_string(),
                resolution: (540.0, 960.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.18, 0.32, 0.16)))

        // Our game plugin
        .add_plugins(bloom_hunt::BloomHuntPlugin)

        .run();
}
