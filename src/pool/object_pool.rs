//! Tagged pool of reusable sprite entities.

use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

use super::components::PooledItem;

/// Pool used for every obstacle and collectible in a level.
pub const ITEM_POOL_TAG: &str = "Interactable";

/// What every instance of a pool starts out as.
#[derive(Clone)]
pub struct PoolTemplate {
    pub sprite: Sprite,
}

impl Default for PoolTemplate {
    fn default() -> Self {
        Self {
            sprite: Sprite {
                custom_size: Some(Vec2::ONE),
                ..default()
            },
        }
    }
}

/// Result of handing an entity back to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Hidden and queued for reuse.
    Recycled,
    /// The tag has no pool, so the entity was despawned.
    Destroyed,
    /// The entity was not leased from this pool. Nothing changed.
    NotLeased,
}

struct Pool {
    template: PoolTemplate,
    available: VecDeque<Entity>,
    spawn_counter: u32,
}

impl Pool {
    fn instantiate(&mut self, commands: &mut Commands, tag: &str) -> Entity {
        self.spawn_counter += 1;
        commands
            .spawn((
                Name::new(format!("{} {}", tag, self.spawn_counter)),
                PooledItem {
                    tag: tag.to_string(),
                },
                self.template.sprite.clone(),
                Transform::default(),
                Visibility::Hidden,
            ))
            .id()
    }
}

/// Resource owning every pool, keyed by tag.
///
/// Instances are plain entities. A pooled instance is hidden and parentless;
/// a leased one is visible and tracked in `leased` until released. Reuse is
/// first-released-first-reused.
#[derive(Resource, Default)]
pub struct ObjectPool {
    pools: HashMap<String, Pool>,
    /// Leased entity -> tag it was leased from.
    leased: HashMap<Entity, String>,
}

impl ObjectPool {
    /// Create a pool and pre-spawn `initial_capacity` hidden instances.
    /// Does nothing if the tag already exists.
    pub fn configure(
        &mut self,
        commands: &mut Commands,
        tag: &str,
        template: PoolTemplate,
        initial_capacity: usize,
    ) {
        if self.pools.contains_key(tag) {
            debug!("Pool '{}' already configured", tag);
            return;
        }

        let mut pool = Pool {
            template,
            available: VecDeque::with_capacity(initial_capacity),
            spawn_counter: 0,
        };
        for _ in 0..initial_capacity {
            let entity = pool.instantiate(commands, tag);
            pool.available.push_back(entity);
        }

        info!("Configured pool '{}' with {} instances", tag, initial_capacity);
        self.pools.insert(tag.to_string(), pool);
    }

    /// Lease an instance, spawning a new one when the queue is empty.
    ///
    /// Returns `None` for an unknown tag; the caller skips that spawn.
    pub fn acquire(
        &mut self,
        commands: &mut Commands,
        tag: &str,
        transform: Transform,
        parent: Option<Entity>,
    ) -> Option<Entity> {
        let Some(pool) = self.pools.get_mut(tag) else {
            warn!("Pool with tag '{}' doesn't exist", tag);
            return None;
        };

        let entity = match pool.available.pop_front() {
            Some(entity) => entity,
            None => {
                let entity = pool.instantiate(commands, tag);
                debug!("Pool '{}' empty, grew to {} instances", tag, pool.spawn_counter);
                entity
            }
        };
        self.leased.insert(entity, tag.to_string());

        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((transform, Visibility::Inherited));
        match parent {
            Some(parent) => {
                entity_commands.set_parent(parent);
            }
            None => {
                entity_commands.remove_parent();
            }
        }

        Some(entity)
    }

    /// Hide an instance, detach it and queue it for reuse.
    ///
    /// An unknown tag despawns the entity instead. Releasing something that
    /// is not currently leased from `tag` is rejected.
    pub fn release(&mut self, commands: &mut Commands, tag: &str, entity: Entity) -> ReleaseOutcome {
        let Some(pool) = self.pools.get_mut(tag) else {
            // Never despawn an instance still queued in another pool
            if self.leased.remove(&entity).is_none() {
                warn!(
                    "Ignoring release of {:?} to non-existent pool '{}': not leased",
                    entity, tag
                );
                return ReleaseOutcome::NotLeased;
            }
            warn!(
                "Trying to return {:?} to non-existent pool '{}'. Destroying instead.",
                entity, tag
            );
            if let Some(entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn_recursive();
            }
            return ReleaseOutcome::Destroyed;
        };

        if self.leased.get(&entity).map(String::as_str) != Some(tag) {
            warn!("Ignoring release of {:?}: not leased from pool '{}'", entity, tag);
            return ReleaseOutcome::NotLeased;
        }
        self.leased.remove(&entity);

        commands
            .entity(entity)
            .insert(Visibility::Hidden)
            .remove_parent();
        pool.available.push_back(entity);

        ReleaseOutcome::Recycled
    }

    pub fn has_pool(&self, tag: &str) -> bool {
        self.pools.contains_key(tag)
    }

    /// Instances waiting in a pool's queue (0 for unknown tags).
    pub fn available_count(&self, tag: &str) -> usize {
        self.pools.get(tag).map_or(0, |pool| pool.available.len())
    }

    /// Instances ever spawned for a pool (0 for unknown tags).
    pub fn instance_count(&self, tag: &str) -> usize {
        self.pools.get(tag).map_or(0, |pool| pool.spawn_counter as usize)
    }

    pub fn leased_count(&self) -> usize {
        self.leased.len()
    }

    pub fn is_leased(&self, entity: Entity) -> bool {
        self.leased.contains_key(&entity)
    }
}
