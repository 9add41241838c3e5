use std::time::{Duration, Instant};

/// Play timer for one session. Starts when the scramble finishes and is
/// frozen once ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerState {
    pub started_timestamp: Option<Instant>,
    pub ended_timestamp: Option<Instant>,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.started_timestamp.is_some() && self.ended_timestamp.is_none()
    }

    pub fn is_ended(&self) -> bool {
        self.ended_timestamp.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(started) = self.started_timestamp else {
            return Duration::ZERO;
        };
        self.ended_timestamp
            .unwrap_or(now)
            .saturating_duration_since(started)
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.elapsed(now).as_secs_f64()
    }

    pub fn started(&self, now: Instant) -> TimerState {
        TimerState {
            started_timestamp: Some(now),
            ended_timestamp: None,
        }
    }

    /// Freeze the timer. Ending an already ended timer keeps the first end.
    pub fn ended(&self, now: Instant) -> TimerState {
        let mut new_state = *self;
        if new_state.started_timestamp.is_some() && new_state.ended_timestamp.is_none() {
            new_state.ended_timestamp = Some(now);
        }
        new_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_not_started() {
        let timer = TimerState::default();
        assert_eq!(timer.elapsed(Instant::now()), Duration::ZERO);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_elapsed_running() {
        let now = Instant::now();
        let timer = TimerState::default().started(now);
        assert!(timer.is_running());
        assert_eq!(
            timer.elapsed(now + Duration::from_millis(2500)),
            Duration::from_millis(2500)
        );
        assert_eq!(timer.elapsed_secs(now + Duration::from_millis(2500)), 2.5);
    }

    #[test]
    fn test_elapsed_with_end_is_frozen() {
        let now = Instant::now();
        let timer = TimerState::default()
            .started(now)
            .ended(now + Duration::from_secs(10));

        assert!(timer.is_ended());
        assert_eq!(timer.elapsed(now + Duration::from_secs(60)), Duration::from_secs(10));

        let ended_again = timer.ended(now + Duration::from_secs(30));
        assert_eq!(ended_again.elapsed(now), Duration::from_secs(10));
    }

    #[test]
    fn test_end_before_start_is_ignored() {
        let now = Instant::now();
        let timer = TimerState::default().ended(now);
        assert!(!timer.is_ended());
    }
}
