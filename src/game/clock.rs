use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime};

/// Time source for the engine: a monotonic clock for the play timer and the
/// wall clock for leaderboard timestamps.
pub trait Clock {
    fn now(&self) -> Instant;
    fn wall_time(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a
/// handle kept outside the engine can drive the engine's clock.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base_instant: Instant,
    base_wall: SystemTime,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new(base_wall: SystemTime) -> Self {
        Self {
            base_instant: Instant::now(),
            base_wall,
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base_instant + self.offset.get()
    }

    fn wall_time(&self) -> SystemTime {
        self.base_wall + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_manual_clock_moves_both_times() {
        let clock = ManualClock::new(UNIX_EPOCH);
        let handle = clock.clone();
        let start = clock.now();

        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now() - start, Duration::from_secs(3));
        assert_eq!(clock.wall_time(), UNIX_EPOCH + Duration::from_secs(3));
    }
}
