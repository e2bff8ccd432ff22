use super::mode::GAME_DURATION_SECS;

/// What a single tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// The clock is stopped; nothing changed.
    Ignored,
    /// One second elapsed and time remains.
    Running { remaining: u32 },
    /// The last second elapsed; the clock stopped itself.
    Expired,
}

/// Whole-second countdown.
///
/// The clock never counts below zero and never moves while stopped, so a
/// tick delivered after a game ended is harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl SessionClock {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Resets to the full duration and starts counting.
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = self.duration > 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            ClockTick::Expired
        } else {
            ClockTick::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn elapsed(&self) -> u32 {
        self.duration - self.remaining
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new(GAME_DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_ignores_ticks() {
        let mut clock = SessionClock::default();
        assert_eq!(clock.tick(), ClockTick::Ignored);
        assert_eq!(clock.remaining(), 30);
    }

    #[test]
    fn test_counts_down_to_expiry() {
        let mut clock = SessionClock::new(3);
        clock.start();
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 2 });
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 1 });
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert!(!clock.is_running());
        assert_eq!(clock.tick(), ClockTick::Ignored);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.elapsed(), 3);
    }

    #[test]
    fn test_start_resets() {
        let mut clock = SessionClock::default();
        clock.start();
        for _ in 0..10 {
            clock.tick();
        }
        assert_eq!(clock.remaining(), 20);
        clock.start();
        assert_eq!(clock.remaining(), 30);
        assert!(clock.is_running());
    }

    #[test]
    fn test_stop_freezes_remaining_time() {
        let mut clock = SessionClock::default();
        clock.start();
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), ClockTick::Ignored);
        assert_eq!(clock.remaining(), 29);
    }
}
