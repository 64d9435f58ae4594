//! Grid geometry for the spawn area.

use bevy::prelude::*;
use rand::Rng;

/// Shrink a visible rectangle by `padding` on every edge.
///
/// A rectangle smaller than twice the padding collapses to zero size at its
/// inset minimum corner.
pub fn safe_area(viewport: Rect, padding: f32) -> Rect {
    let min = viewport.min + Vec2::splat(padding);
    let max = viewport.max - Vec2::splat(padding);
    Rect { min, max: max.max(min) }
}

/// Columns and rows of square cells needed to cover an area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridDimensions {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: f32,
}

impl GridDimensions {
    /// Cover `area` with cells, rounding partial cells up.
    pub fn fit(area: Rect, cell_size: f32) -> Self {
        let size = area.size();
        Self {
            columns: (size.x / cell_size).ceil().max(0.0) as usize,
            rows: (size.y / cell_size).ceil().max(0.0) as usize,
            cell_size,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Centre of a cell, measured from the area's minimum corner.
    pub fn cell_center(&self, area: Rect, column: usize, row: usize) -> Vec2 {
        area.min
            + Vec2::new(
                (column as f32 + 0.5) * self.cell_size,
                (row as f32 + 0.5) * self.cell_size,
            )
    }
}

/// Offset a point by up to `min(max_offset, padding)` on each axis.
///
/// Capping at the padding keeps jittered points near the safe area's edge
/// from drifting further out than the inset that created it.
pub fn jitter(point: Vec2, max_offset: f32, padding: f32, rng: &mut impl Rng) -> Vec2 {
    let bound = max_offset.min(padding);
    if bound <= 0.0 {
        return point;
    }
    point
        + Vec2::new(
            rng.gen_range(-bound..=bound),
            rng.gen_range(-bound..=bound),
        )
}
