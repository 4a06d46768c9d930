//! A pausable per-turn countdown.
//!
//! The clock never reads the system time. Every operation that depends on time
//! takes the caller's monotonic `now`, and the countdown only moves when
//! [`TurnClock::tick`] is called.

use tracing::{debug, trace};

/// Monotonic milliseconds supplied by the caller.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ClockState {
    Idle,
    Running {
        remaining: u8,
        /// When the current second started, shifted forward by time spent paused.
        boundary: Millis,
        paused_at: Option<Millis>,
    },
    Expired,
}

/// What a call to [`TurnClock::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockTick {
    Unchanged,
    /// At least one second elapsed; this many remain.
    Counted(u8),
    /// The countdown reached zero on this tick. Reported once.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnClock {
    countdown: u8,
    interval: Millis,
    state: ClockState,
}

impl TurnClock {
    /// A stopped clock counting `countdown` steps of `interval` milliseconds once armed.
    pub fn new(countdown: u8, interval: Millis) -> Self {
        Self {
            countdown,
            interval,
            state: ClockState::Idle,
        }
    }

    #[inline]
    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Start a fresh countdown. Has no effect on a clock that is already running.
    pub fn arm(&mut self, now: Millis) {
        if self.is_running() {
            return;
        }
        debug!(countdown = self.countdown, now, "clock armed");
        self.state = ClockState::Running {
            remaining: self.countdown,
            boundary: now,
            paused_at: None,
        };
    }

    /// Stop the clock and forget its progress.
    pub fn cancel(&mut self) {
        if self.state != ClockState::Idle {
            debug!("clock cancelled");
        }
        self.state = ClockState::Idle;
    }

    /// Count down every whole interval elapsed since the last boundary.
    pub fn tick(&mut self, now: Millis) -> ClockTick {
        let ClockState::Running {
            remaining,
            boundary,
            paused_at: None,
        } = &mut self.state
        else {
            return ClockTick::Unchanged;
        };

        let before = *remaining;
        while *remaining > 0 && now.saturating_sub(*boundary) >= self.interval {
            *remaining -= 1;
            *boundary += self.interval;
            trace!(remaining = *remaining, "clock decrement");
        }

        if *remaining == 0 {
            debug!(now, "clock expired");
            self.state = ClockState::Expired;
            ClockTick::Expired
        } else if *remaining != before {
            ClockTick::Counted(*remaining)
        } else {
            ClockTick::Unchanged
        }
    }

    /// Freeze the countdown. A second pause is ignored.
    pub fn pause(&mut self, now: Millis) {
        if let ClockState::Running {
            paused_at: paused_at @ None,
            ..
        } = &mut self.state
        {
            *paused_at = Some(now);
        }
    }

    /// Continue the countdown, discounting the time spent paused.
    /// A resume without a pause is ignored.
    pub fn resume(&mut self, now: Millis) {
        if let ClockState::Running {
            boundary,
            paused_at: paused_at @ Some(_),
            ..
        } = &mut self.state
        {
            if let Some(since) = paused_at.take() {
                *boundary += now.saturating_sub(since);
            }
        }
    }

    /// Whole seconds left, if the clock is running.
    pub fn remaining(&self) -> Option<u8> {
        match self.state {
            ClockState::Running { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(
            self.state,
            ClockState::Running {
                paused_at: Some(_),
                ..
            }
        )
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.state == ClockState::Expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(now: Millis) -> TurnClock {
        let mut clock = TurnClock::new(30, 1000);
        clock.arm(now);
        clock
    }

    #[test]
    fn idle_clock_ignores_everything() {
        let mut clock = TurnClock::new(30, 1000);
        assert_eq!(clock.tick(50_000), ClockTick::Unchanged);
        clock.pause(10);
        clock.resume(20);
        assert!(!clock.is_running());
        assert!(!clock.is_paused());
        assert_eq!(clock.remaining(), None);
    }

    #[test]
    fn counts_whole_intervals() {
        let mut clock = armed(0);
        assert_eq!(clock.remaining(), Some(30));
        assert_eq!(clock.tick(999), ClockTick::Unchanged);
        assert_eq!(clock.tick(1000), ClockTick::Counted(29));
        assert_eq!(clock.tick(1500), ClockTick::Unchanged);
        assert_eq!(clock.tick(4200), ClockTick::Counted(26));
        assert_eq!(clock.tick(4999), ClockTick::Unchanged);
        assert_eq!(clock.tick(5000), ClockTick::Counted(25));
    }

    #[test]
    fn expires_exactly_once() {
        let mut clock = armed(100);
        assert_eq!(clock.tick(30_099), ClockTick::Counted(1));
        assert_eq!(clock.tick(30_100), ClockTick::Expired);
        assert!(clock.is_expired());
        assert!(!clock.is_running());
        assert_eq!(clock.tick(31_100), ClockTick::Unchanged);
        assert_eq!(clock.tick(99_000), ClockTick::Unchanged);
    }

    #[test]
    fn long_gap_jumps_straight_to_expiry() {
        let mut clock = armed(0);
        assert_eq!(clock.tick(1_000_000), ClockTick::Expired);
    }

    #[test]
    fn pause_preserves_remaining_time() {
        let mut clock = armed(0);
        assert_eq!(clock.tick(2600), ClockTick::Counted(28));

        clock.pause(2600);
        assert!(clock.is_paused());
        assert_eq!(clock.tick(60_000), ClockTick::Unchanged);
        assert_eq!(clock.remaining(), Some(28));

        clock.resume(60_000);
        assert!(!clock.is_paused());
        // 400 ms of the third second were left when paused.
        assert_eq!(clock.tick(60_399), ClockTick::Unchanged);
        assert_eq!(clock.tick(60_400), ClockTick::Counted(27));
    }

    #[test]
    fn duplicate_pause_and_resume_are_ignored() {
        let mut clock = armed(0);
        clock.pause(500);
        clock.pause(5000);
        clock.resume(1500);
        clock.resume(9000);
        // Only the 1000 ms between the first pause and first resume is discounted.
        assert_eq!(clock.tick(1999), ClockTick::Unchanged);
        assert_eq!(clock.tick(2000), ClockTick::Counted(29));
    }

    #[test]
    fn arm_while_running_keeps_progress() {
        let mut clock = armed(0);
        clock.tick(3000);
        clock.arm(3000);
        assert_eq!(clock.remaining(), Some(27));
    }

    #[test]
    fn cancel_then_arm_restarts() {
        let mut clock = armed(0);
        clock.tick(3000);
        clock.cancel();
        assert_eq!(clock.remaining(), None);
        clock.arm(3000);
        assert_eq!(clock.remaining(), Some(30));
        assert_eq!(clock.tick(4000), ClockTick::Counted(29));
    }

    #[test]
    fn rearm_after_expiry() {
        let mut clock = TurnClock::new(2, 100);
        clock.arm(0);
        assert_eq!(clock.tick(200), ClockTick::Expired);
        clock.arm(500);
        assert_eq!(clock.remaining(), Some(2));
        assert_eq!(clock.tick(600), ClockTick::Counted(1));
    }
}
