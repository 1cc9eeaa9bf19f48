//! Outage intervals, final and intermediate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::time::TimeOfDay;

/// How an interval was derived.
///
/// Only `Base` survives reconciliation; the other kinds exist while change
/// announcements are being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Base,
    Extra,
    Change,
    ChangeStart,
    ChangeEnd,
}

impl IntervalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Base => "base",
            IntervalKind::Extra => "extra",
            IntervalKind::Change => "change",
            IntervalKind::ChangeStart => "change_start",
            IntervalKind::ChangeEnd => "change_end",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "extra" => Ok(Self::Extra),
            "change" => Ok(Self::Change),
            "change_start" => Ok(Self::ChangeStart),
            "change_end" => Ok(Self::ChangeEnd),
            other => Err(format!("Unknown interval type: {}", other)),
        }
    }
}

/// A time window with both ends known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Span {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }
}

/// A realized outage window as exposed to storage and the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(rename = "type")]
    pub kind: IntervalKind,
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay, kind: IntervalKind) -> Self {
        Self { start, end, kind }
    }

    pub fn base(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self::new(start, end, IntervalKind::Base)
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Outage length in minutes, reading `end < start` as crossing midnight.
    pub fn duration_minutes(&self) -> u32 {
        self.start.minutes_until(self.end)
    }
}

impl From<Span> for Interval {
    fn from(span: Span) -> Self {
        Interval::base(span.start, span.end)
    }
}

/// Interval as collected during parsing, before reconciliation.
///
/// Start and end shifts only carry the boundary they move; they are resolved
/// against an existing base interval and never reach the final schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInterval {
    Base(Span),
    Extra(Span),
    Change(Span),
    ChangeStart(TimeOfDay),
    ChangeEnd(TimeOfDay),
}

impl RawInterval {
    pub fn kind(&self) -> IntervalKind {
        match self {
            RawInterval::Base(_) => IntervalKind::Base,
            RawInterval::Extra(_) => IntervalKind::Extra,
            RawInterval::Change(_) => IntervalKind::Change,
            RawInterval::ChangeStart(_) => IntervalKind::ChangeStart,
            RawInterval::ChangeEnd(_) => IntervalKind::ChangeEnd,
        }
    }

    pub fn start(&self) -> Option<TimeOfDay> {
        match self {
            RawInterval::Base(s) | RawInterval::Extra(s) | RawInterval::Change(s) => Some(s.start),
            RawInterval::ChangeStart(t) => Some(*t),
            RawInterval::ChangeEnd(_) => None,
        }
    }

    pub fn end(&self) -> Option<TimeOfDay> {
        match self {
            RawInterval::Base(s) | RawInterval::Extra(s) | RawInterval::Change(s) => Some(s.end),
            RawInterval::ChangeStart(_) => None,
            RawInterval::ChangeEnd(t) => Some(*t),
        }
    }
}
