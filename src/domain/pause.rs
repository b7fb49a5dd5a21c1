//! Time-gated pause lifecycle.
//!
//! A vault may be paused manually only during its *pause window*, which
//! starts at construction. After the window ends a *buffer period*
//! follows during which the manual flag is frozen: a vault unpaused at
//! the window end operates normally, one left paused stays paused until
//! the buffer period ends. After that the vault is permanently unpaused.
//!
//! ```text
//!  construction      pause_window_end       buffer_period_end
//!       │  Active ⇄ Paused  │   BufferPeriod    │  PermanentlyUnpaused
//!  ─────┴───────────────────┴───────────────────┴──────────────────────▶ t
//! ```
//!
//! The phase is never stored: [`PauseState::status_at`] derives it from
//! the two configured end times, the manual flag and `now`. Gating reads
//! [`PauseState::is_operation_allowed`], not the phase label.

use std::fmt;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::PauseError;

/// One day.
pub const DAY: StdDuration = StdDuration::from_secs(86_400);

/// Thirty days.
pub const MONTH: StdDuration = StdDuration::from_secs(30 * 86_400);

/// Longest pause window a vault may be configured with.
pub const MAX_PAUSE_WINDOW_DURATION: StdDuration = StdDuration::from_secs(270 * 86_400);

/// Longest buffer period a vault may be configured with.
pub const MAX_BUFFER_PERIOD_DURATION: StdDuration = StdDuration::from_secs(90 * 86_400);

/// Lifecycle phase derived at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseStatus {
    /// Inside the pause window, not paused.
    Active,
    /// Inside the pause window, manually paused.
    Paused,
    /// Between the pause window end and the buffer period end. A pause
    /// left set at the window end still blocks operations here.
    BufferPeriod,
    /// At or after the buffer period end. Terminal.
    PermanentlyUnpaused,
}

impl PauseStatus {
    /// Returns the status as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::BufferPeriod => "buffer_period",
            Self::PermanentlyUnpaused => "permanently_unpaused",
        }
    }
}

impl fmt::Display for PauseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pause configuration plus the manual pause flag.
///
/// Invariant: `buffer_period_end >= pause_window_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PauseState {
    pause_window_end: DateTime<Utc>,
    buffer_period_end: DateTime<Utc>,
    manually_paused: bool,
}

impl PauseState {
    /// Computes both end times from `start` and the two durations.
    ///
    /// # Errors
    ///
    /// Returns [`PauseError::PauseWindowTooLong`] or
    /// [`PauseError::BufferPeriodTooLong`] when a duration exceeds its
    /// maximum.
    pub fn new(
        start: DateTime<Utc>,
        pause_window_duration: StdDuration,
        buffer_period_duration: StdDuration,
    ) -> Result<Self, PauseError> {
        let window_too_long = || PauseError::PauseWindowTooLong {
            requested_secs: pause_window_duration.as_secs(),
            max_secs: MAX_PAUSE_WINDOW_DURATION.as_secs(),
        };
        let buffer_too_long = || PauseError::BufferPeriodTooLong {
            requested_secs: buffer_period_duration.as_secs(),
            max_secs: MAX_BUFFER_PERIOD_DURATION.as_secs(),
        };

        if pause_window_duration > MAX_PAUSE_WINDOW_DURATION {
            return Err(window_too_long());
        }
        if buffer_period_duration > MAX_BUFFER_PERIOD_DURATION {
            return Err(buffer_too_long());
        }

        let window = Duration::from_std(pause_window_duration).map_err(|_| window_too_long())?;
        let buffer = Duration::from_std(buffer_period_duration).map_err(|_| buffer_too_long())?;

        let pause_window_end = start.checked_add_signed(window).ok_or_else(window_too_long)?;
        let buffer_period_end = pause_window_end
            .checked_add_signed(buffer)
            .ok_or_else(buffer_too_long)?;

        Ok(Self {
            pause_window_end,
            buffer_period_end,
            manually_paused: false,
        })
    }

    /// End of the window during which pause/unpause is permitted.
    #[must_use]
    pub const fn pause_window_end(&self) -> DateTime<Utc> {
        self.pause_window_end
    }

    /// End of the buffer period; from here on the vault is permanently unpaused.
    #[must_use]
    pub const fn buffer_period_end(&self) -> DateTime<Utc> {
        self.buffer_period_end
    }

    /// Whether the manual pause flag is set.
    #[must_use]
    pub const fn is_manually_paused(&self) -> bool {
        self.manually_paused
    }

    /// Derives the lifecycle phase at `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> PauseStatus {
        if now >= self.buffer_period_end {
            PauseStatus::PermanentlyUnpaused
        } else if now >= self.pause_window_end {
            PauseStatus::BufferPeriod
        } else if self.manually_paused {
            PauseStatus::Paused
        } else {
            PauseStatus::Active
        }
    }

    /// Returns `true` unless the manual pause is in force at `now`.
    ///
    /// The flag can only change before the pause window ends, so a pause
    /// still set at that point holds until the buffer period ends.
    #[must_use]
    pub fn is_operation_allowed(&self, now: DateTime<Utc>) -> bool {
        !(self.manually_paused && now < self.buffer_period_end)
    }

    /// Fails once the pause window has closed.
    ///
    /// # Errors
    ///
    /// Returns [`PauseError::PauseWindowExpired`] when `now` is at or
    /// after the pause window end.
    pub fn ensure_window_open(&self, now: DateTime<Utc>) -> Result<(), PauseError> {
        if now >= self.pause_window_end {
            return Err(PauseError::PauseWindowExpired);
        }
        Ok(())
    }

    /// Sets or clears the manual pause flag.
    ///
    /// # Errors
    ///
    /// Returns [`PauseError::PauseWindowExpired`] when `now` is at or
    /// after the pause window end; the flag is left unchanged.
    pub fn set_paused(&mut self, paused: bool, now: DateTime<Utc>) -> Result<(), PauseError> {
        self.ensure_window_open(now)?;
        self.manually_paused = paused;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn months(n: i64) -> Duration {
        Duration::days(30 * n)
    }

    fn make_state(start: DateTime<Utc>) -> PauseState {
        let Ok(state) = PauseState::new(start, MONTH * 3, MONTH) else {
            panic!("valid durations");
        };
        state
    }

    #[test]
    fn end_times_derived_from_start() {
        let t0 = Utc::now();
        let state = make_state(t0);
        assert_eq!(state.pause_window_end(), t0 + months(3));
        assert_eq!(state.buffer_period_end(), t0 + months(4));
        assert!(state.buffer_period_end() >= state.pause_window_end());
        assert!(!state.is_manually_paused());
    }

    #[test]
    fn active_until_paused() {
        let t0 = Utc::now();
        let state = make_state(t0);
        assert_eq!(state.status_at(t0), PauseStatus::Active);
        assert!(state.is_operation_allowed(t0 + months(1)));
    }

    #[test]
    fn pause_and_unpause_inside_window() {
        let t0 = Utc::now();
        let mut state = make_state(t0);

        assert!(state.set_paused(true, t0 + months(2)).is_ok());
        assert_eq!(state.status_at(t0 + months(2)), PauseStatus::Paused);
        assert!(!state.is_operation_allowed(t0 + months(2)));

        assert!(state.set_paused(false, t0 + months(2)).is_ok());
        assert_eq!(state.status_at(t0 + months(2)), PauseStatus::Active);
    }

    #[test]
    fn pause_at_window_end_is_rejected() {
        let t0 = Utc::now();
        let mut state = make_state(t0);
        let result = state.set_paused(true, t0 + months(3));
        assert_eq!(result, Err(PauseError::PauseWindowExpired));
        assert!(!state.is_manually_paused());
    }

    #[test]
    fn pause_left_set_holds_through_buffer_period() {
        let t0 = Utc::now();
        let mut state = make_state(t0);
        assert!(state.set_paused(true, t0 + Duration::days(60)).is_ok());

        let mid_buffer = t0 + Duration::days(105);
        assert_eq!(state.status_at(mid_buffer), PauseStatus::BufferPeriod);
        assert!(state.is_manually_paused());
        assert!(!state.is_operation_allowed(mid_buffer));

        let last_instant = state.buffer_period_end() - Duration::seconds(1);
        assert!(!state.is_operation_allowed(last_instant));
        assert!(state.is_operation_allowed(state.buffer_period_end()));
        assert_eq!(
            state.status_at(state.buffer_period_end()),
            PauseStatus::PermanentlyUnpaused
        );
    }

    #[test]
    fn unpause_before_window_end_frees_buffer_period() {
        let t0 = Utc::now();
        let mut state = make_state(t0);
        assert!(state.set_paused(true, t0 + months(1)).is_ok());
        assert!(state.set_paused(false, t0 + months(2)).is_ok());

        let mid_buffer = t0 + Duration::days(105);
        assert_eq!(state.status_at(mid_buffer), PauseStatus::BufferPeriod);
        assert!(state.is_operation_allowed(mid_buffer));
    }

    #[test]
    fn permanently_unpaused_from_buffer_end_onwards() {
        let t0 = Utc::now();
        let state = make_state(t0);
        for later in [months(4), months(5), months(48)] {
            assert_eq!(state.status_at(t0 + later), PauseStatus::PermanentlyUnpaused);
        }
    }

    #[test]
    fn zero_durations_skip_straight_to_terminal() {
        let t0 = Utc::now();
        let Ok(state) = PauseState::new(t0, StdDuration::ZERO, StdDuration::ZERO) else {
            panic!("zero durations are valid");
        };
        assert_eq!(state.status_at(t0), PauseStatus::PermanentlyUnpaused);
    }

    #[test]
    fn buffer_may_be_shorter_than_window() {
        let t0 = Utc::now();
        let Ok(state) = PauseState::new(t0, MONTH * 6, DAY) else {
            panic!("valid durations");
        };
        assert_eq!(state.buffer_period_end() - state.pause_window_end(), Duration::days(1));
    }

    #[test]
    fn rejects_oversized_durations() {
        let t0 = Utc::now();
        let too_long = MAX_PAUSE_WINDOW_DURATION + DAY;
        assert!(matches!(
            PauseState::new(t0, too_long, MONTH),
            Err(PauseError::PauseWindowTooLong { .. })
        ));
        let too_long = MAX_BUFFER_PERIOD_DURATION + DAY;
        assert!(matches!(
            PauseState::new(t0, MONTH, too_long),
            Err(PauseError::BufferPeriodTooLong { .. })
        ));
    }

    #[test]
    fn status_strings() {
        assert_eq!(PauseStatus::BufferPeriod.to_string(), "buffer_period");
        assert_eq!(PauseStatus::Paused.as_str(), "paused");
    }
}
