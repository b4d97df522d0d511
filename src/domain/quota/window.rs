//! Clock boundary policy
//!
//! "Today" is the half-open interval [midnight UTC, next midnight UTC). All
//! window math routes through `utc_day_window` so the reset rule lives in one
//! deterministic function instead of scattered date comparisons.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The accounting window containing a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Inclusive start (midnight UTC)
    pub start: DateTime<Utc>,
    /// Exclusive end (next midnight UTC)
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Whether `instant` falls inside this window (start inclusive, end exclusive)
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Return the UTC calendar-day window containing `now`
///
/// Pure and deterministic given `now`; callers thread the clock reading in
/// explicitly so boundary behavior is unit-testable.
pub fn utc_day_window(now: DateTime<Utc>) -> DayWindow {
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();

    DayWindow {
        start,
        end: start + Duration::days(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_window_spans_one_utc_day() {
        let window = utc_day_window(utc(2024, 3, 15, 13, 42, 7));

        assert_eq!(window.start, utc(2024, 3, 15, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 16, 0, 0, 0));
    }

    #[test]
    fn test_midnight_belongs_to_new_window() {
        // Start inclusive: the boundary instant is assigned to the window it
        // opens, making the reset instantaneous and unambiguous.
        let midnight = utc(2024, 3, 16, 0, 0, 0);
        let window = utc_day_window(midnight);

        assert_eq!(window.start, midnight);
        assert!(window.contains(midnight));
    }

    #[test]
    fn test_end_is_exclusive() {
        let window = utc_day_window(utc(2024, 3, 15, 12, 0, 0));

        assert!(window.contains(utc(2024, 3, 15, 23, 59, 59)));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn test_deterministic() {
        let now = utc(2024, 3, 15, 6, 30, 0);
        assert_eq!(utc_day_window(now), utc_day_window(now));
    }

    #[test]
    fn test_adjacent_days_do_not_overlap() {
        let before = utc_day_window(utc(2024, 3, 15, 23, 59, 59));
        let after = utc_day_window(utc(2024, 3, 16, 0, 0, 0));

        assert_eq!(before.end, after.start);
        assert!(!before.contains(after.start));
    }

    #[test]
    fn test_leap_day() {
        let window = utc_day_window(utc(2024, 2, 29, 18, 0, 0));

        assert_eq!(window.start, utc(2024, 2, 29, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 1, 0, 0, 0));
    }
}
