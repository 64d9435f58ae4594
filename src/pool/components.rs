//! Pool-related components.

use bevy::prelude::*;

/// Marks an entity as owned by the object pool under `tag`.
#[derive(Component, Debug, Clone)]
pub struct PooledItem {
    pub tag: String,
}
