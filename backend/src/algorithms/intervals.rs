//! Interval algebra on a minutes-since-midnight axis.
//!
//! Everything here compares literal minute values: an overnight window such
//! as `23:00-02:00` is `1380..120` and is not unwrapped across midnight.

use crate::models::{Span, TimeOfDay, MINUTES_PER_DAY};

/// A time window expressed as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinuteSpan {
    pub start: u32,
    pub end: u32,
}

impl MinuteSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn to_span(self) -> Span {
        Span::new(
            TimeOfDay::from_minutes(self.start),
            TimeOfDay::from_minutes(self.end),
        )
    }

    /// Length in minutes, reading `end < start` as crossing midnight.
    pub fn duration(self) -> u32 {
        if self.end >= self.start {
            self.end - self.start
        } else {
            MINUTES_PER_DAY - self.start + self.end
        }
    }

    /// Smallest window covering both `self` and `other`.
    pub fn union(self, other: MinuteSpan) -> MinuteSpan {
        MinuteSpan::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Span> for MinuteSpan {
    fn from(span: Span) -> Self {
        MinuteSpan::new(span.start.minutes(), span.end.minutes())
    }
}

/// Half-open overlap test: `[a.start, a.end)` and `[b.start, b.end)` share
/// at least one minute. Touching windows do not overlap.
pub fn overlaps(a: MinuteSpan, b: MinuteSpan) -> bool {
    !(a.end <= b.start || b.end <= a.start)
}

/// Index of the value numerically closest to `target`.
///
/// Ties resolve to the earliest index; an empty input gives `None`.
pub fn nearest_index<I>(values: I, target: u32) -> Option<usize>
where
    I: IntoIterator<Item = u32>,
{
    let mut best: Option<(usize, u32)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        let diff = value.abs_diff(target);
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((idx, diff)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Sort by start and merge windows that overlap or touch.
///
/// A window whose start is at or before the running window's end extends
/// that end when it reaches further; the running start never moves back.
/// Windows sharing a start collapse into the longest one, so an overnight
/// window is never followed by another with the same start.
pub fn coalesce(mut spans: Vec<MinuteSpan>) -> Vec<MinuteSpan> {
    spans.sort_by_key(|s| s.start);

    let mut merged: Vec<MinuteSpan> = Vec::with_capacity(spans.len());
    for current in spans {
        match merged.last_mut() {
            Some(last) if current.start == last.start => {
                if current.duration() > last.duration() {
                    last.end = current.end;
                }
            }
            Some(last) if current.start <= last.end => {
                if current.end > last.end {
                    last.end = current.end;
                }
            }
            _ => merged.push(current),
        }
    }
    merged
}
