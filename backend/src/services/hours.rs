//! Total outage hours per queue and date.

use crate::models::Interval;

/// Sum of interval durations in hours, rounded to one decimal.
///
/// An interval whose end is earlier than its start crosses midnight:
/// `23:00-02:00` counts as 3 hours.
pub fn total_hours_off(intervals: &[Interval]) -> f64 {
    round_hours(intervals.iter().map(Interval::duration_minutes).sum())
}

fn round_hours(minutes: u32) -> f64 {
    (f64::from(minutes) / 60.0 * 10.0).round() / 10.0
}
