//! Level module - grid layout of obstacles and collectibles.

mod components;
mod error;
mod grid;
mod layout;
mod plugin;
mod selection;
mod viewport;

pub use components::{Interactable, ItemVisual, LevelRoot};
pub use error::LayoutError;
pub use grid::{jitter, safe_area, GridDimensions};
pub use layout::{BuildRequest, CollectOutcome, EntityRole, LevelLayout};
pub use plugin::{setup_level, LayoutRng, LevelPlugin};
pub use selection::WeightedTable;
pub use viewport::{GameCamera, ViewportBounds, VIEW_HEIGHT};
