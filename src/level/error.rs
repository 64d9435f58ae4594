//! Error types for level layout.

use thiserror::Error;

use super::layout::EntityRole;

/// Configuration problems that abort a layout build.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Game data resource is missing.
    #[error("Game data not loaded, cannot build level")]
    MissingGameData,

    /// No camera has reported its visible area yet.
    #[error("Viewport bounds unavailable, cannot build level")]
    MissingViewport,

    /// A variant list is empty.
    #[error("No {role:?} variants to choose from")]
    NoVariants { role: EntityRole },

    /// Difficulty produced a cell size the grid cannot use.
    #[error("Grid cell size must be positive, got {0}")]
    InvalidCellSize(f32),
}
