//! Level plugin - builds and clears the meadow between states.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::components::{ItemVisual, LevelRoot};
use super::layout::{BuildRequest, CollectOutcome, LevelLayout};
use super::viewport::{spawn_camera, update_viewport_bounds, ViewportBounds};
use crate::config::{load_game_data, GameData};
use crate::core::{AllCollected, GameState, ItemCollected};
use crate::difficulty::DifficultyLevel;
use crate::pool::ObjectPool;

/// Random source for layouts.
#[derive(Resource)]
pub struct LayoutRng(pub StdRng);

impl Default for LayoutRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Level plugin - owns the layout, the camera and the level root.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelLayout>()
            .init_resource::<LayoutRng>()
            .add_systems(
                Startup,
                (
                    spawn_camera,
                    spawn_level_root,
                    seed_layout_rng.after(load_game_data),
                ),
            )
            .add_systems(PreUpdate, update_viewport_bounds)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnEnter(GameState::MainMenu), clear_level)
            .add_systems(
                Update,
                (
                    handle_item_collected.run_if(in_state(GameState::InGame)),
                    sync_item_sprites,
                ),
            );
    }
}

fn spawn_level_root(mut commands: Commands) {
    commands.spawn((
        Name::new("Level Root"),
        LevelRoot,
        Transform::default(),
        Visibility::default(),
    ));
}

/// Use the configured seed so layouts can be replayed.
fn seed_layout_rng(mut rng: ResMut<LayoutRng>, game_data: Option<Res<GameData>>) {
    if let Some(seed) = game_data.and_then(|data| data.seed) {
        info!("Layout seed fixed to {}", seed);
        rng.0 = StdRng::seed_from_u64(seed);
    }
}

/// Build the layout for the current difficulty level.
#[allow(clippy::too_many_arguments)]
pub fn setup_level(
    mut commands: Commands,
    mut layout: ResMut<LevelLayout>,
    mut pool: ResMut<ObjectPool>,
    mut rng: ResMut<LayoutRng>,
    game_data: Option<Res<GameData>>,
    viewport: Option<Res<ViewportBounds>>,
    level: Res<DifficultyLevel>,
    root_query: Query<Entity, With<LevelRoot>>,
) {
    let request = BuildRequest {
        level: level.current(),
        game_data: game_data.as_deref(),
        viewport: viewport.map(|bounds| bounds.0),
        parent: root_query.get_single().ok(),
    };

    layout.build(&mut commands, &mut pool, &request, &mut rng.0);
}

/// Return the whole layout to the pool.
fn clear_level(
    mut commands: Commands,
    mut layout: ResMut<LevelLayout>,
    mut pool: ResMut<ObjectPool>,
) {
    layout.clear_existing_level(&mut commands, &mut pool);
}

/// Remove collected items and announce when none are left.
fn handle_item_collected(
    mut commands: Commands,
    mut events: EventReader<ItemCollected>,
    mut all_collected: EventWriter<AllCollected>,
    mut layout: ResMut<LevelLayout>,
    mut pool: ResMut<ObjectPool>,
) {
    for event in events.read() {
        if layout.on_item_collected(&mut commands, &mut pool, event.item)
            == CollectOutcome::AllCollected
        {
            info!("All collectibles found");
            all_collected.send(AllCollected);
        }
    }
}

/// Apply each item's chosen visual to its sprite.
fn sync_item_sprites(
    asset_server: Res<AssetServer>,
    mut query: Query<(&ItemVisual, &mut Sprite), Changed<ItemVisual>>,
) {
    for (visual, mut sprite) in query.iter_mut() {
        sprite.image = visual
            .image
            .as_ref()
            .map(|path| asset_server.load(path.clone()))
            .unwrap_or_default();
        sprite.color = visual.color;
        sprite.custom_size = Some(Vec2::splat(visual.size));
    }
}
