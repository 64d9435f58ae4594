//! Global events used for cross-system communication.
//!
//! Input reports pickups, the layout reports when the last flower is gone,
//! and the session announces how a session ended. Presentation systems can
//! listen to any of them without the senders knowing.

use bevy::prelude::*;

/// Sent when the player clicks a collectible.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemCollected {
    /// The collectible entity
    pub item: Entity,
}

/// Sent once when the last collectible of a session is removed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct AllCollected;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every collectible found in time
    Victory,
    /// Timer ran out
    Defeat,
}

/// Sent when a session finishes.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionEnded {
    pub outcome: SessionOutcome,
    /// Difficulty level the session was played at
    pub level: u32,
}
