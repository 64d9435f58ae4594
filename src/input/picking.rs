//! Click picking against placed items.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::GameData;
use crate::core::{ItemCollected, PlayState};
use crate::level::{Interactable, LevelLayout, ViewportBounds};
use crate::pool::PooledItem;

/// Input plugin - left click collects while a session is running.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, pick_items.run_if(in_state(PlayState::Running)));
    }
}

/// An item that could be under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct PickCandidate {
    pub entity: Entity,
    /// World position; z is the draw depth.
    pub position: Vec3,
    /// Uniform scale of the item.
    pub scale: f32,
}

/// Items whose scaled hit circle contains `point`, topmost first.
pub fn items_under(
    point: Vec2,
    hit_radius: f32,
    candidates: impl IntoIterator<Item = PickCandidate>,
) -> Vec<Entity> {
    let mut hits: Vec<PickCandidate> = candidates
        .into_iter()
        .filter(|c| c.position.truncate().distance(point) <= hit_radius * c.scale)
        .collect();
    hits.sort_by(|a, b| b.position.z.total_cmp(&a.position.z));
    hits.into_iter().map(|c| c.entity).collect()
}

/// Report the first collectible under a left click.
#[allow(clippy::too_many_arguments)]
pub fn pick_items(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    item_query: Query<(Entity, &GlobalTransform, &ViewVisibility), With<PooledItem>>,
    interactable_query: Query<(), With<Interactable>>,
    viewport: Option<Res<ViewportBounds>>,
    game_data: Option<Res<GameData>>,
    layout: Res<LevelLayout>,
    mut collected: EventWriter<ItemCollected>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let (Some(viewport), Some(game_data)) = (viewport, game_data) else {
        return;
    };
    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(point) = viewport.cursor_to_world(cursor, window.size()) else {
        return;
    };

    let candidates = item_query
        .iter()
        .filter(|(_, _, visibility)| visibility.get())
        .map(|(entity, transform, _)| {
            let (scale, _, position) = transform.to_scale_rotation_translation();
            PickCandidate {
                entity,
                position,
                scale: scale.x,
            }
        });
    let hits = items_under(point, game_data.layout.hit_radius, candidates);

    let collectible = hits
        .iter()
        .find(|&&entity| interactable_query.contains(entity) && layout.is_collectible(entity));
    match collectible {
        Some(&item) => {
            collected.send(ItemCollected { item });
        }
        None if hits.is_empty() => debug!("Click at {:?} hit nothing", point),
        None => debug!("Click at {:?} hit {} non-collectible items", point, hits.len()),
    }
}
