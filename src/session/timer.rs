//! Session countdown.

use bevy::prelude::*;

/// Time left in the current session.
///
/// Only ticks while running; pausing the game simply stops calling `tick`.
#[derive(Resource, Debug, Default)]
pub struct SessionTimer {
    remaining: f32,
    running: bool,
}

impl SessionTimer {
    pub fn start(&mut self, limit: f32) {
        self.remaining = limit.max(0.0);
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `delta` seconds. Returns true on the tick that expires it.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = (self.remaining - delta).max(0.0);
        if self.remaining <= 0.0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_once() {
        let mut timer = SessionTimer::default();
        timer.start(1.0);

        assert!(!timer.tick(0.6));
        assert!(timer.tick(0.6));
        assert!(!timer.tick(0.6));
        assert_eq!(timer.remaining(), 0.0);
        assert!(!timer.is_running());
    }

    #[test]
    fn stopped_timer_keeps_remaining_time() {
        let mut timer = SessionTimer::default();
        timer.start(30.0);
        timer.tick(5.0);
        timer.stop();

        assert!(!timer.tick(100.0));
        assert_eq!(timer.remaining(), 25.0);
    }

    #[test]
    fn idle_timer_never_expires() {
        let mut timer = SessionTimer::default();
        assert!(!timer.tick(1.0));
    }
}
