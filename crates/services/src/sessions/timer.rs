use chrono::{DateTime, Duration, Utc};

/// What a timer tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// No countdown is running.
    Idle,
    /// Whole seconds left, rounded up.
    Running { remaining_secs: u32 },
    /// The countdown reached zero on this tick. Reported once per arming.
    Expired,
}

/// Countdown for the problem currently on screen.
///
/// A session owns exactly one of these. Arming replaces any running countdown,
/// and an expiry is reported by at most one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemTimer {
    duration_secs: u32,
    deadline: Option<DateTime<Utc>>,
}

impl ProblemTimer {
    /// A timer counting down `duration_secs` per problem; `0` never arms.
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            deadline: None,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.duration_secs > 0
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start a fresh countdown from `now`.
    pub fn arm(&mut self, now: DateTime<Utc>) {
        self.deadline = self
            .is_enabled()
            .then(|| now + Duration::seconds(i64::from(self.duration_secs)));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Seconds left, rounded up, while running.
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<u32> {
        let deadline = self.deadline?;
        let left_ms = deadline.signed_duration_since(now).num_milliseconds().max(0);
        let secs = (left_ms + 999) / 1000;
        Some(u32::try_from(secs).unwrap_or(u32::MAX))
    }

    /// Advance the countdown to `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TimerTick {
        match self.remaining_secs(now) {
            None => TimerTick::Idle,
            Some(0) => {
                self.deadline = None;
                TimerTick::Expired
            }
            Some(remaining_secs) => TimerTick::Running { remaining_secs },
        }
    }
}

/// Countdown text as shown next to a problem, e.g. `1:05`.
#[must_use]
pub fn format_remaining(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
