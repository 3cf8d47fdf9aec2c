//! Hour-aligned observation window resolution.
//!
//! The observation feed publishes one snapshot per completed hour, so a
//! query at 14:37 reads the 13:00 snapshot. The current time is always an
//! injected parameter — nothing in this crate reads the clock — which
//! keeps window resolution a pure, testable function.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike as _};
use serde::Serialize;

/// +09:00, checked at compile time.
const KST: FixedOffset = match FixedOffset::east_opt(9 * 3600) {
    Some(offset) => offset,
    None => unreachable!(),
};

/// Korea Standard Time. The feed's `base_date`/`base_time` keys are KST
/// regardless of where the process runs.
#[must_use]
pub const fn kst() -> FixedOffset {
    KST
}

/// One hour-aligned observation window, the request key for the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationWindow {
    /// Calendar date of the window (KST).
    pub date: NaiveDate,
    /// Hour of day, 0..=23 (KST).
    pub hour: u32,
}

impl ObservationWindow {
    /// Resolves the window for a query time: truncate to the top of the
    /// hour, then step back one hour to the last completed snapshot.
    #[must_use]
    pub fn for_time(now: DateTime<FixedOffset>) -> Self {
        let base = now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
            - Duration::hours(1);

        Self {
            date: base.date_naive(),
            hour: base.hour(),
        }
    }

    /// The feed's `base_date` request key, `YYYYMMDD`.
    #[must_use]
    pub fn base_date(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// The feed's `base_time` request key, `HH00`.
    #[must_use]
    pub fn base_time(&self) -> String {
        format!("{:02}00", self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        kst().with_ymd_and_hms(y, mo, d, h, mi, 30).unwrap()
    }

    #[test]
    fn kst_is_nine_hours_east() {
        assert_eq!(kst().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn truncates_then_steps_back_one_hour() {
        let window = ObservationWindow::for_time(at(2026, 8, 23, 14, 37));
        assert_eq!(window.base_date(), "20260823");
        assert_eq!(window.base_time(), "1300");
    }

    #[test]
    fn top_of_hour_still_steps_back() {
        // 14:00:30 truncates to 14:00, then reads the 13:00 snapshot.
        let window = ObservationWindow::for_time(at(2026, 8, 23, 14, 0));
        assert_eq!(window.base_time(), "1300");
    }

    #[test]
    fn crosses_midnight_backwards() {
        let window = ObservationWindow::for_time(at(2026, 8, 23, 0, 15));
        assert_eq!(window.base_date(), "20260822");
        assert_eq!(window.base_time(), "2300");
    }

    #[test]
    fn same_input_same_window() {
        let a = ObservationWindow::for_time(at(2026, 1, 1, 9, 59));
        let b = ObservationWindow::for_time(at(2026, 1, 1, 9, 59));
        assert_eq!(a, b);
        assert_eq!(a.base_time(), "0800");
    }
}
