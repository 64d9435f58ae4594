//! Session module - countdown, victory and defeat, state keys.

mod plugin;
mod timer;

pub use plugin::SessionPlugin;
pub use timer::SessionTimer;
