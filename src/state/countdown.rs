//! Countdown snapshots and derived display values

use super::{Cycle, CycleId};

/// Snapshot published over the watch channel on every tick and state change.
///
/// `seconds_passed` is recomputed from the active cycle's start instant each
/// tick, never accumulated, so it stays correct across delayed or dropped
/// ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    pub active_cycle_id: Option<CycleId>,
    pub seconds_passed: u64,
}

impl CountdownState {
    /// Snapshot with no cycle counting down.
    pub fn idle() -> Self {
        Self {
            active_cycle_id: None,
            seconds_passed: 0,
        }
    }

    /// Snapshot for an active cycle.
    pub fn active(cycle_id: CycleId, seconds_passed: u64) -> Self {
        Self {
            active_cycle_id: Some(cycle_id),
            seconds_passed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_cycle_id.is_some()
    }
}

/// Total countdown seconds for the active cycle, zero when none is active.
pub fn total_seconds(active_cycle: Option<&Cycle>) -> u64 {
    active_cycle.map(Cycle::total_seconds).unwrap_or(0)
}

/// Signed remaining seconds. Negative once the countdown has overrun; clamping
/// is left to the display.
pub fn current_seconds(total_seconds: u64, seconds_passed: u64) -> i64 {
    total_seconds as i64 - seconds_passed as i64
}

/// Zero-padded minute and second digit pairs, derived fresh on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub minutes: String,
    pub seconds: String,
}

impl CountdownDisplay {
    pub fn derive(active_cycle: Option<&Cycle>, seconds_passed: u64) -> Self {
        let current = current_seconds(total_seconds(active_cycle), seconds_passed).max(0) as u64;

        Self {
            minutes: format!("{:02}", current / 60),
            seconds: format!("{:02}", current % 60),
        }
    }

    /// The `MM:SS` string mirrored into the terminal title.
    pub fn clock(&self) -> String {
        format!("{}:{}", self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CycleList, NewCycle};
    use chrono::{TimeZone, Utc};

    fn cycle(minutes: f64) -> Cycle {
        let mut list = CycleList::default();
        list.start_cycle(
            NewCycle {
                task: "Write report".to_string(),
                minutes_amount: minutes,
            },
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_full_duration_at_zero_elapsed() {
        let cycle = cycle(25.0);
        let display = CountdownDisplay::derive(Some(&cycle), 0);

        assert_eq!(display.minutes, "25");
        assert_eq!(display.seconds, "00");
        assert_eq!(display.clock(), "25:00");
    }

    #[test]
    fn test_display_after_sixty_five_seconds() {
        let cycle = cycle(25.0);
        let display = CountdownDisplay::derive(Some(&cycle), 65);

        // 1500 - 65 = 1435 s
        assert_eq!(display.clock(), "23:55");
    }

    #[test]
    fn test_no_active_cycle_derives_zero() {
        let display = CountdownDisplay::derive(None, 999);

        assert_eq!(display.clock(), "00:00");
    }

    #[test]
    fn test_display_floors_at_zero_when_overrun() {
        let cycle = cycle(25.0);

        assert_eq!(current_seconds(cycle.total_seconds(), 2000), -500);
        assert_eq!(CountdownDisplay::derive(Some(&cycle), 2000).clock(), "00:00");
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let cycle = cycle(25.0);

        let first = CountdownDisplay::derive(Some(&cycle), 65);
        let second = CountdownDisplay::derive(Some(&cycle), 65);

        assert_eq!(first, second);
    }

    #[test]
    fn test_sixty_minute_cycle_renders_sixty() {
        let cycle = cycle(60.0);

        assert_eq!(CountdownDisplay::derive(Some(&cycle), 0).clock(), "60:00");
    }
}
