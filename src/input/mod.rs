//! Input module - turns clicks into pickups.

mod picking;

pub use picking::{items_under, pick_items, InputPlugin, PickCandidate};
