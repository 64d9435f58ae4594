//! Weighted random choice among spawnable variants.

use rand::Rng;

/// Cumulative weight table built once per layout.
///
/// Sampling draws one uniform value in `[0, total)` and binary-searches the
/// prefix sums, so it always terminates. Negative and NaN weights count as
/// zero. When no weight is positive every entry is equally likely.
#[derive(Debug, Clone, Default)]
pub struct WeightedTable {
    cumulative: Vec<f32>,
}

impl WeightedTable {
    pub fn new(weights: impl IntoIterator<Item = f32>) -> Self {
        let mut total = 0.0;
        let cumulative = weights
            .into_iter()
            .map(|weight| {
                total += weight.max(0.0);
                total
            })
            .collect();
        Self { cumulative }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    pub fn total(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Index of the chosen entry, or `None` for an empty table.
    pub fn sample(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let total = self.total();
        if total <= 0.0 {
            return Some(rng.gen_range(0..self.len()));
        }
        let draw = rng.gen_range(0.0..total);
        let index = self.cumulative.partition_point(|&c| c <= draw);
        Some(index.min(self.len() - 1))
    }
}
