use std::time::{Duration, Instant};

/// Event loop poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Countdown cadence
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Get event loop poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// The one recurring countdown schedule. Arming always replaces the previous
/// schedule, so at most one countdown can ever be live.
#[derive(Debug)]
pub struct TickSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the schedule, cancelling any previous one first
    pub fn start(&mut self, now: Instant) {
        self.stop();
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Count ticks that came due by `now` and advance past them
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut count = 0;
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            count += 1;
            self.next_due = Some(due + self.interval);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_inactive_schedule_never_ticks() {
        let mut schedule = TickSchedule::default();
        let now = Instant::now();
        assert!(!schedule.is_active());
        assert_eq!(schedule.due_ticks(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_ticks_once_per_interval() {
        let mut schedule = TickSchedule::default();
        let base = Instant::now();
        schedule.start(base);

        assert_eq!(schedule.due_ticks(base + Duration::from_millis(999)), 0);
        assert_eq!(schedule.due_ticks(base + Duration::from_millis(1000)), 1);
        assert_eq!(schedule.due_ticks(base + Duration::from_millis(1500)), 0);
        // A stalled loop catches up
        assert_eq!(schedule.due_ticks(base + Duration::from_millis(4000)), 3);
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let mut schedule = TickSchedule::default();
        let base = Instant::now();
        for i in 0..5 {
            schedule.start(base + Duration::from_millis(i * 100));
        }
        // Only the last arming counts: due at base + 1.4s
        assert_eq!(schedule.due_ticks(base + Duration::from_millis(1300)), 0);
        assert_eq!(schedule.due_ticks(base + Duration::from_millis(1400)), 1);

        schedule.stop();
        assert_eq!(schedule.due_ticks(base + Duration::from_secs(60)), 0);
    }
}
