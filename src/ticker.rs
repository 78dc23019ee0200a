use std::time::{Duration, Instant};

/// Default UI poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Interval between Pomodoro countdown steps
pub const SECOND: Duration = Duration::from_secs(1);

/// Turns the event loop's wall clock into whole-second ticks.
///
/// At most one tick is pending at a time. `cancel` drops it, which is how
/// a Pomodoro reset stops the countdown.
#[derive(Debug, Clone, Default)]
pub struct SecondTicker {
    next_due: Option<Instant>,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick one second after `now`, unless one is pending
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + SECOND);
        }
    }

    /// Drop the pending tick. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of whole seconds that have come due by `now`.
    /// The pending deadline advances by that many seconds so no time is lost
    /// when the loop wakes late.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut deadline) = self.next_due else {
            return 0;
        };

        let mut count = 0;
        while deadline <= now {
            count += 1;
            deadline += SECOND;
        }
        self.next_due = Some(deadline);
        count
    }
}
