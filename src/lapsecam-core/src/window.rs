//! Time window gate
//!
//! Pure decision function over (hour, minute) pairs. The verdict is
//! advisory: the controller records it but does not suppress capture by
//! default (see [`crate::controller::Controller::set_enforce_window`]).

use chrono::Timelike;

use crate::config::CaptureWindow;

/// Wall-clock time of day. Ordering is lexicographic, hour first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// Wall-clock source. `None` means no usable time this cycle (not yet
/// synced, or the device has no time source at all).
pub trait TimeSource {
    fn now(&self) -> Option<TimeOfDay>;
}

/// System wall clock.
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Option<TimeOfDay> {
        let now = chrono::Local::now();
        Some(TimeOfDay::new(now.hour() as u8, now.minute() as u8))
    }
}

/// True iff `now` lies inside `window`, inclusive on both ends.
///
/// A disabled gate or an unavailable time source always passes. An
/// inverted window (end before start) matches nothing; it does not wrap
/// past midnight.
pub fn is_within_window(
    now: Option<TimeOfDay>,
    window: &CaptureWindow,
    gate_enabled: bool,
) -> bool {
    if !gate_enabled {
        return true;
    }

    match now {
        None => true,
        Some(t) => window.start() <= t && t <= window.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: (u8, u8), end: (u8, u8)) -> CaptureWindow {
        CaptureWindow {
            start_hour: start.0,
            start_minute: start.1,
            end_hour: end.0,
            end_minute: end.1,
        }
    }

    #[test]
    fn boundaries_are_inclusive_on_both_ends() {
        let w = window((6, 0), (22, 0));

        assert!(!is_within_window(Some(TimeOfDay::new(5, 59)), &w, true));
        assert!(is_within_window(Some(TimeOfDay::new(6, 0)), &w, true));
        assert!(is_within_window(Some(TimeOfDay::new(12, 30)), &w, true));
        assert!(is_within_window(Some(TimeOfDay::new(22, 0)), &w, true));
        assert!(!is_within_window(Some(TimeOfDay::new(22, 1)), &w, true));
    }

    #[test]
    fn minutes_only_matter_within_the_boundary_hour() {
        let w = window((6, 30), (22, 15));

        assert!(!is_within_window(Some(TimeOfDay::new(6, 29)), &w, true));
        assert!(is_within_window(Some(TimeOfDay::new(6, 30)), &w, true));
        assert!(is_within_window(Some(TimeOfDay::new(7, 0)), &w, true));
        assert!(is_within_window(Some(TimeOfDay::new(22, 15)), &w, true));
        assert!(!is_within_window(Some(TimeOfDay::new(22, 16)), &w, true));
    }

    #[test]
    fn disabled_gate_always_passes() {
        let w = window((6, 0), (22, 0));

        assert!(is_within_window(Some(TimeOfDay::new(3, 0)), &w, false));
        assert!(is_within_window(None, &w, false));
    }

    #[test]
    fn missing_time_source_passes() {
        let w = window((6, 0), (22, 0));

        assert!(is_within_window(None, &w, true));
    }

    #[test]
    fn inverted_window_matches_nothing() {
        // end before start: a direct bound comparison, no midnight wrap
        let w = window((22, 0), (6, 0));

        assert!(!is_within_window(Some(TimeOfDay::new(23, 0)), &w, true));
        assert!(!is_within_window(Some(TimeOfDay::new(5, 0)), &w, true));
        assert!(!is_within_window(Some(TimeOfDay::new(12, 0)), &w, true));
    }

    #[test]
    fn time_of_day_displays_padded_minutes() {
        assert_eq!(TimeOfDay::new(6, 5).to_string(), "6:05");
        assert_eq!(TimeOfDay::new(22, 0).to_string(), "22:00");
    }
}
