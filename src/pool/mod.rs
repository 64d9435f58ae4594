//! Pool module - reusable entity instances grouped by tag.

mod components;
mod object_pool;
mod plugin;

pub use components::PooledItem;
pub use object_pool::{ObjectPool, PoolTemplate, ReleaseOutcome, ITEM_POOL_TAG};
pub use plugin::{configure_pools, PoolPlugin};
