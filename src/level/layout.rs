//! Level layout - grid placement of obstacles and collectibles.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::ops::RangeInclusive;

use super::components::{Interactable, ItemVisual};
use super::error::LayoutError;
use super::grid::{self, GridDimensions};
use super::selection::WeightedTable;
use crate::config::{GameData, SpawnableVariant};
use crate::pool::{ObjectPool, ReleaseOutcome, ITEM_POOL_TAG};

/// Draw layers for obstacles. Drawn above collectibles so flowers hide in the grass.
const OBSTACLE_LAYERS: RangeInclusive<u32> = 20..=30;

/// Draw layers for collectibles.
const COLLECTIBLE_LAYERS: RangeInclusive<u32> = 10..=20;

/// World-space Z per draw layer.
const LAYER_DEPTH: f32 = 0.01;

/// What a placed entity is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRole {
    /// Decoration covering the meadow.
    Obstacle,
    /// Something the player has to find.
    Collectible,
}

/// Result of reporting a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The entity is not a live collectible. Nothing changed.
    NotTracked,
    /// Collected; this many are left.
    Remaining(usize),
    /// Collected the last one.
    AllCollected,
}

/// Everything `LevelLayout::build` needs besides commands, pool and RNG.
#[derive(Clone, Copy)]
pub struct BuildRequest<'a> {
    pub level: u32,
    pub game_data: Option<&'a GameData>,
    /// Visible world rectangle.
    pub viewport: Option<Rect>,
    /// Entity to attach placed items to.
    pub parent: Option<Entity>,
}

/// Per-session layout state.
///
/// Every live entity is registered under exactly one role. Building first
/// clears whatever the previous session left behind.
#[derive(Resource, Default)]
pub struct LevelLayout {
    registry: HashMap<Entity, EntityRole>,
    occupied_positions: Vec<Vec2>,
    safe_area: Rect,
    grid: GridDimensions,
}

impl LevelLayout {
    /// Build a level and return the number of collectibles placed.
    ///
    /// Configuration errors are logged and reported as zero collectibles.
    pub fn build(
        &mut self,
        commands: &mut Commands,
        pool: &mut ObjectPool,
        request: &BuildRequest,
        rng: &mut impl Rng,
    ) -> usize {
        match self.try_build(commands, pool, request, rng) {
            Ok(placed) => placed,
            Err(e) => {
                error!("Level build aborted: {}", e);
                0
            }
        }
    }

    /// Build a level, surfacing configuration errors.
    pub fn try_build(
        &mut self,
        commands: &mut Commands,
        pool: &mut ObjectPool,
        request: &BuildRequest,
        rng: &mut impl Rng,
    ) -> Result<usize, LayoutError> {
        self.clear_existing_level(commands, pool);

        let game_data = request.game_data.ok_or(LayoutError::MissingGameData)?;
        let viewport = request.viewport.ok_or(LayoutError::MissingViewport)?;

        let obstacle_table = variant_table(&game_data.obstacle_variants, EntityRole::Obstacle)?;
        let collectible_table =
            variant_table(&game_data.collectible_variants, EntityRole::Collectible)?;

        let cell_size = game_data.difficulty.cell_size(request.level);
        if !(cell_size > 0.0) {
            return Err(LayoutError::InvalidCellSize(cell_size));
        }

        let layout_config = &game_data.layout;
        let padding = layout_config.spawn_area_padding;
        let area = grid::safe_area(viewport, padding);
        let grid = GridDimensions::fit(area, cell_size);
        self.safe_area = area;
        self.grid = grid;

        let mut occupied = Vec::with_capacity(grid.cell_count());
        for column in 0..grid.columns {
            for row in 0..grid.rows {
                let center = grid.cell_center(area, column, row);
                let position =
                    grid::jitter(center, layout_config.max_position_offset, padding, rng);
                occupied.push(position);

                if let Some(index) = obstacle_table.sample(rng) {
                    self.place_item(
                        commands,
                        pool,
                        PlacedItem {
                            position,
                            role: EntityRole::Obstacle,
                            variant: &game_data.obstacle_variants[index],
                        },
                        game_data,
                        request.parent,
                        rng,
                    );
                }
            }
        }

        let requested = game_data.difficulty.collectible_count(request.level);
        occupied.shuffle(rng);

        let mut placed = 0;
        for &position in occupied.iter().take(requested) {
            let Some(index) = collectible_table.sample(rng) else {
                continue;
            };
            let spawned = self.place_item(
                commands,
                pool,
                PlacedItem {
                    position,
                    role: EntityRole::Collectible,
                    variant: &game_data.collectible_variants[index],
                },
                game_data,
                request.parent,
                rng,
            );
            if spawned.is_some() {
                placed += 1;
            }
        }
        self.occupied_positions = occupied;

        info!(
            "Built level {}: {}x{} grid (cell {:.2}), {} obstacles, {} collectibles",
            request.level,
            grid.columns,
            grid.rows,
            cell_size,
            self.obstacle_count(),
            placed
        );
        Ok(placed)
    }

    /// Acquire one item from the pool, dress it, and register its role.
    fn place_item(
        &mut self,
        commands: &mut Commands,
        pool: &mut ObjectPool,
        item: PlacedItem,
        game_data: &GameData,
        parent: Option<Entity>,
        rng: &mut impl Rng,
    ) -> Option<Entity> {
        let layers = match item.role {
            EntityRole::Obstacle => OBSTACLE_LAYERS,
            EntityRole::Collectible => COLLECTIBLE_LAYERS,
        };
        let depth = rng.gen_range(layers) as f32 * LAYER_DEPTH;

        let (min_scale, max_scale) = item.variant.size_range;
        let scale = if max_scale > min_scale {
            rng.gen_range(min_scale..=max_scale)
        } else {
            min_scale
        };

        let max_rotation = game_data.layout.max_rotation_offset.abs();
        let rotation = if max_rotation > 0.0 {
            rng.gen_range(-max_rotation..=max_rotation)
        } else {
            0.0
        };

        let transform = Transform::from_translation(item.position.extend(depth))
            .with_rotation(Quat::from_rotation_z(rotation.to_radians()))
            .with_scale(Vec3::splat(scale));

        let entity = pool.acquire(commands, ITEM_POOL_TAG, transform, parent)?;

        let (r, g, b) = item.variant.color;
        let color = match item.role {
            EntityRole::Obstacle => Color::srgb(r, g, b),
            // Slight colour variation for flowers
            EntityRole::Collectible => Color::hsv(
                rng.gen_range(0.0..360.0),
                rng.gen_range(0.8..=1.0),
                rng.gen_range(0.8..=1.0),
            ),
        };
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(ItemVisual {
            variant: item.variant.name.clone(),
            image: item.variant.image.clone(),
            color,
            size: self.grid.cell_size,
        });
        // Recycled instances may still carry the marker from a previous role
        match item.role {
            EntityRole::Collectible => {
                entity_commands.insert(Interactable);
            }
            EntityRole::Obstacle => {
                entity_commands.remove::<Interactable>();
            }
        }

        self.registry.insert(entity, item.role);
        Some(entity)
    }

    /// Return every placed entity to the pool and forget the layout.
    ///
    /// Safe on an empty layout. A failed release is logged and the rest
    /// are still returned.
    pub fn clear_existing_level(&mut self, commands: &mut Commands, pool: &mut ObjectPool) {
        self.safe_area = Rect::default();
        self.grid = GridDimensions::default();
        if self.registry.is_empty() && self.occupied_positions.is_empty() {
            return;
        }

        let total = self.registry.len();
        let mut failed = 0;
        for (entity, _) in self.registry.drain() {
            if pool.release(commands, ITEM_POOL_TAG, entity) != ReleaseOutcome::Recycled {
                failed += 1;
            }
        }
        self.occupied_positions.clear();

        if failed > 0 {
            warn!("Cleared level: {} of {} entities were not recycled", failed, total);
        } else {
            debug!("Cleared level: returned {} entities to the pool", total);
        }
    }

    pub fn is_collectible(&self, entity: Entity) -> bool {
        self.role_of(entity) == Some(EntityRole::Collectible)
    }

    /// Remove a collected item and return it to the pool.
    pub fn on_item_collected(
        &mut self,
        commands: &mut Commands,
        pool: &mut ObjectPool,
        entity: Entity,
    ) -> CollectOutcome {
        if !self.is_collectible(entity) {
            warn!(
                "Collected item {:?} was not found in the active collectibles",
                entity
            );
            return CollectOutcome::NotTracked;
        }

        self.registry.remove(&entity);
        pool.release(commands, ITEM_POOL_TAG, entity);

        let remaining = self.collectible_count();
        info!("Collected {:?}. Remaining collectibles: {}", entity, remaining);
        if remaining == 0 {
            CollectOutcome::AllCollected
        } else {
            CollectOutcome::Remaining(remaining)
        }
    }

    pub fn role_of(&self, entity: Entity) -> Option<EntityRole> {
        self.registry.get(&entity).copied()
    }

    pub fn entities_with_role(&self, role: EntityRole) -> impl Iterator<Item = Entity> + '_ {
        self.registry
            .iter()
            .filter(move |(_, r)| **r == role)
            .map(|(entity, _)| *entity)
    }

    pub fn collectible_count(&self) -> usize {
        self.entities_with_role(EntityRole::Collectible).count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.entities_with_role(EntityRole::Obstacle).count()
    }

    /// Jittered cell positions, in collectible-assignment order.
    pub fn occupied_positions(&self) -> &[Vec2] {
        &self.occupied_positions
    }

    pub fn safe_area(&self) -> Rect {
        self.safe_area
    }

    pub fn columns(&self) -> usize {
        self.grid.columns
    }

    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size
    }
}

struct PlacedItem<'a> {
    position: Vec2,
    role: EntityRole,
    variant: &'a SpawnableVariant,
}

fn variant_table(
    variants: &[SpawnableVariant],
    role: EntityRole,
) -> Result<WeightedTable, LayoutError> {
    if variants.is_empty() {
        return Err(LayoutError::NoVariants { role });
    }
    Ok(WeightedTable::new(
        variants.iter().map(|variant| variant.spawn_probability),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PoolTemplate;
    use bevy::ecs::world::CommandQueue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_commands<R>(world: &mut World, f: impl FnOnce(&mut Commands) -> R) -> R {
        let mut queue = CommandQueue::default();
        let result = {
            let mut commands = Commands::new(&mut queue, world);
            f(&mut commands)
        };
        queue.apply(world);
        result
    }

    /// Safe area 8x6 with exact 1.5 cells: 6 columns, 4 rows.
    fn test_data() -> GameData {
        let mut data = GameData::default();
        data.difficulty.base_grid_cell_size = 1.5;
        data.difficulty.density_step = 0.0;
        data
    }

    const VIEWPORT: Rect = Rect {
        min: Vec2::new(-5.0, -4.0),
        max: Vec2::new(5.0, 4.0),
    };

    struct Fixture {
        world: World,
        pool: ObjectPool,
        layout: LevelLayout,
        rng: StdRng,
    }

    impl Fixture {
        fn new(capacity: usize) -> Self {
            let mut world = World::new();
            let mut pool = ObjectPool::default();
            with_commands(&mut world, |commands| {
                pool.configure(commands, ITEM_POOL_TAG, PoolTemplate::default(), capacity);
            });
            Self {
                world,
                pool,
                layout: LevelLayout::default(),
                rng: StdRng::seed_from_u64(11),
            }
        }

        fn build(&mut self, data: Option<&GameData>, level: u32) -> Result<usize, LayoutError> {
            let request = BuildRequest {
                level,
                game_data: data,
                viewport: Some(VIEWPORT),
                parent: None,
            };
            let Self {
                world,
                pool,
                layout,
                rng,
            } = self;
            with_commands(world, |commands| layout.try_build(commands, pool, &request, rng))
        }

        fn collect(&mut self, entity: Entity) -> CollectOutcome {
            let Self {
                world,
                pool,
                layout,
                ..
            } = self;
            with_commands(world, |commands| layout.on_item_collected(commands, pool, entity))
        }
    }

    #[test]
    fn build_fills_every_cell_and_places_requested_collectibles() {
        let data = test_data();
        let mut fx = Fixture::new(64);

        let placed = fx.build(Some(&data), 1).unwrap();

        assert_eq!(fx.layout.columns(), 6);
        assert_eq!(fx.layout.rows(), 4);
        assert_eq!(fx.layout.obstacle_count(), 24);
        assert_eq!(fx.layout.occupied_positions().len(), 24);
        assert_eq!(placed, 10);
        assert_eq!(fx.layout.collectible_count(), 10);
        assert_eq!(fx.pool.leased_count(), 34);
    }

    #[test]
    fn collectibles_are_capped_by_cell_count() {
        let mut data = test_data();
        data.difficulty.base_collectible_count = 100;
        let mut fx = Fixture::new(0);

        let placed = fx.build(Some(&data), 1).unwrap();

        assert_eq!(placed, 24);
        assert_eq!(fx.layout.collectible_count(), 24);
    }

    #[test]
    fn collectibles_sit_on_obstacle_positions() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        fx.build(Some(&data), 1).unwrap();

        let obstacle_positions: Vec<Vec2> = fx
            .layout
            .entities_with_role(EntityRole::Obstacle)
            .map(|e| fx.world.get::<Transform>(e).unwrap().translation.truncate())
            .collect();
        for entity in fx.layout.entities_with_role(EntityRole::Collectible) {
            let transform = fx.world.get::<Transform>(entity).unwrap();
            assert!(obstacle_positions.contains(&transform.translation.truncate()));
            // Hidden beneath the obstacle layer
            assert!(transform.translation.z <= 20.0 * LAYER_DEPTH + f32::EPSILON);
            assert!(fx.world.get::<ItemVisual>(entity).is_some());
            assert!(fx.world.get::<Interactable>(entity).is_some());
        }
    }

    #[test]
    fn is_collectible_matches_registry() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        fx.build(Some(&data), 1).unwrap();

        let collectible = fx
            .layout
            .entities_with_role(EntityRole::Collectible)
            .next()
            .unwrap();
        let obstacle = fx
            .layout
            .entities_with_role(EntityRole::Obstacle)
            .next()
            .unwrap();
        let stranger = fx.world.spawn_empty().id();

        assert!(fx.layout.is_collectible(collectible));
        assert!(!fx.layout.is_collectible(obstacle));
        assert!(!fx.layout.is_collectible(stranger));
    }

    #[test]
    fn collecting_everything_reports_all_collected_once() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        fx.build(Some(&data), 1).unwrap();
        let collectibles: Vec<Entity> = fx
            .layout
            .entities_with_role(EntityRole::Collectible)
            .collect();

        let outcomes: Vec<CollectOutcome> = collectibles.iter().map(|&e| fx.collect(e)).collect();

        let all_collected = outcomes
            .iter()
            .filter(|o| **o == CollectOutcome::AllCollected)
            .count();
        assert_eq!(all_collected, 1);
        assert_eq!(outcomes.last(), Some(&CollectOutcome::AllCollected));
        assert_eq!(outcomes[0], CollectOutcome::Remaining(9));
        assert_eq!(fx.collect(collectibles[0]), CollectOutcome::NotTracked);
        assert_eq!(fx.layout.obstacle_count(), 24);
        assert!(!fx.pool.is_leased(collectibles[0]));
    }

    #[test]
    fn collecting_an_obstacle_is_a_no_op() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        fx.build(Some(&data), 1).unwrap();
        let obstacle = fx
            .layout
            .entities_with_role(EntityRole::Obstacle)
            .next()
            .unwrap();

        assert_eq!(fx.collect(obstacle), CollectOutcome::NotTracked);
        assert_eq!(fx.layout.obstacle_count(), 24);
        assert!(fx.pool.is_leased(obstacle));
    }

    #[test]
    fn rebuild_does_not_leak_pool_instances() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        let baseline = fx.pool.available_count(ITEM_POOL_TAG);

        fx.build(Some(&data), 1).unwrap();
        fx.build(Some(&data), 1).unwrap();
        assert_eq!(fx.pool.leased_count(), 34);
        assert_eq!(fx.pool.instance_count(ITEM_POOL_TAG), 64);

        let Fixture {
            world,
            pool,
            layout,
            ..
        } = &mut fx;
        with_commands(world, |commands| layout.clear_existing_level(commands, pool));
        assert_eq!(fx.pool.available_count(ITEM_POOL_TAG), baseline);
        assert_eq!(fx.pool.leased_count(), 0);
        assert_eq!(fx.layout.collectible_count(), 0);
        assert!(fx.layout.occupied_positions().is_empty());
    }

    #[test]
    fn recycled_obstacles_lose_the_interactable_marker() {
        let data = test_data();
        let mut fx = Fixture::new(0);
        fx.build(Some(&data), 1).unwrap();
        fx.build(Some(&data), 1).unwrap();

        for entity in fx.layout.entities_with_role(EntityRole::Obstacle) {
            assert!(fx.world.get::<Interactable>(entity).is_none());
        }
    }

    #[test]
    fn clear_keeps_going_after_a_failed_release() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        let baseline = fx.pool.available_count(ITEM_POOL_TAG);
        fx.build(Some(&data), 1).unwrap();
        let stolen = fx
            .layout
            .entities_with_role(EntityRole::Collectible)
            .next()
            .unwrap();

        let Fixture {
            world,
            pool,
            layout,
            ..
        } = &mut fx;
        with_commands(world, |commands| {
            assert_eq!(
                pool.release(commands, ITEM_POOL_TAG, stolen),
                ReleaseOutcome::Recycled
            );
            layout.clear_existing_level(commands, pool);
        });

        assert_eq!(fx.pool.leased_count(), 0);
        assert_eq!(fx.pool.available_count(ITEM_POOL_TAG), baseline);
        assert_eq!(fx.layout.obstacle_count() + fx.layout.collectible_count(), 0);
        assert_eq!(fx.layout.role_of(stolen), None);
    }

    #[test]
    fn clear_and_failed_build_forget_the_grid() {
        let data = test_data();
        let mut fx = Fixture::new(64);
        fx.build(Some(&data), 1).unwrap();
        assert_eq!(fx.layout.columns(), 6);

        assert_eq!(fx.build(None, 1), Err(LayoutError::MissingGameData));

        assert_eq!(fx.layout.columns(), 0);
        assert_eq!(fx.layout.rows(), 0);
        assert_eq!(fx.layout.cell_size(), 0.0);
        assert_eq!(fx.layout.safe_area(), Rect::default());
    }

    #[test]
    fn clearing_an_empty_layout_is_harmless() {
        let mut fx = Fixture::new(4);
        let Fixture {
            world,
            pool,
            layout,
            ..
        } = &mut fx;
        with_commands(world, |commands| layout.clear_existing_level(commands, pool));
        with_commands(world, |commands| layout.clear_existing_level(commands, pool));
        assert_eq!(fx.pool.available_count(ITEM_POOL_TAG), 4);
    }

    #[test]
    fn missing_game_data_builds_nothing() {
        let mut fx = Fixture::new(4);
        assert_eq!(fx.build(None, 1), Err(LayoutError::MissingGameData));
        assert_eq!(fx.pool.leased_count(), 0);
    }

    #[test]
    fn empty_variant_list_is_a_configuration_error() {
        let mut data = test_data();
        data.obstacle_variants.clear();
        let mut fx = Fixture::new(4);
        assert_eq!(
            fx.build(Some(&data), 1),
            Err(LayoutError::NoVariants {
                role: EntityRole::Obstacle
            })
        );
    }

    #[test]
    fn all_zero_probabilities_still_terminate() {
        let mut data = test_data();
        for variant in data
            .obstacle_variants
            .iter_mut()
            .chain(data.collectible_variants.iter_mut())
        {
            variant.spawn_probability = 0.0;
        }
        let mut fx = Fixture::new(0);
        assert_eq!(fx.build(Some(&data), 1), Ok(10));
    }

    #[test]
    fn build_wrapper_reports_zero_on_error() {
        let mut fx = Fixture::new(4);
        let request = BuildRequest {
            level: 1,
            game_data: None,
            viewport: Some(VIEWPORT),
            parent: None,
        };
        let Fixture {
            world,
            pool,
            layout,
            rng,
        } = &mut fx;
        let placed = with_commands(world, |commands| layout.build(commands, pool, &request, rng));
        assert_eq!(placed, 0);
    }
}
