// ============================================================================
// Schedule input and output records
// ============================================================================
//
// A `ScheduleBlock` is what the page extraction step hands over for one date;
// a `ParsedSchedule` is what the parser produces from it and what storage
// persists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::interval::Interval;
use super::queue::QueueId;

/// Raw text for one announced date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub date: NaiveDate,
    /// Base table, one queue per line in the usual layout.
    #[serde(default)]
    pub schedule_text: String,
    /// Free-form operational change notices, empty when there are none.
    #[serde(default)]
    pub extras_text: String,
}

impl ScheduleBlock {
    pub fn new(
        date: NaiveDate,
        schedule_text: impl Into<String>,
        extras_text: impl Into<String>,
    ) -> Self {
        Self {
            date,
            schedule_text: schedule_text.into(),
            extras_text: extras_text.into(),
        }
    }
}

/// Reconciled outage windows for one date.
///
/// Every queue present maps to a non-empty, start-ordered, non-overlapping
/// sequence of `base` intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSchedule {
    pub date: NaiveDate,
    pub queues: BTreeMap<QueueId, Vec<Interval>>,
    /// Trimmed change notice text, kept for display even when unparsed.
    pub message: Option<String>,
}

impl ParsedSchedule {
    /// True when no queue produced any interval, i.e. nothing to save.
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    pub fn intervals(&self, queue: QueueId) -> &[Interval] {
        self.queues.get(&queue).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn interval_count(&self) -> usize {
        self.queues.values().map(Vec::len).sum()
    }
}

/// Message text as stored: trimmed, and absent when blank.
pub fn clean_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
