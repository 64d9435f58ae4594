//! Level-related components.

use bevy::prelude::*;

/// Parent of every entity placed by the layout.
#[derive(Component)]
pub struct LevelRoot;

/// Marks a placed item the player can click to collect.
#[derive(Component, Debug, Default)]
pub struct Interactable;

/// Visual chosen for a placed item. Applied to its sprite by a system so the
/// layout itself never touches assets.
#[derive(Component, Debug, Clone)]
pub struct ItemVisual {
    /// Variant name from the game data.
    pub variant: String,
    pub image: Option<String>,
    pub color: Color,
    /// Edge length of the unscaled sprite, in world units.
    pub size: f32,
}
