//! Resolution of change announcements against the base schedule.
//!
//! Per queue, raw intervals are split by kind, shifts are applied to the
//! nearest base interval, full replacements widen the first overlapping
//! base interval, supplementary windows are appended, and the result is
//! coalesced into a sorted, non-overlapping sequence of `base` intervals.

use std::collections::BTreeMap;

use super::intervals::{coalesce, nearest_index, overlaps, MinuteSpan};
use crate::models::{Interval, QueueId, RawInterval};

/// Raw intervals of one queue, grouped by how they must be applied.
#[derive(Debug, Default)]
struct Grouped {
    base: Vec<MinuteSpan>,
    start_shifts: Vec<u32>,
    end_shifts: Vec<u32>,
    replacements: Vec<MinuteSpan>,
    supplementary: Vec<MinuteSpan>,
}

impl Grouped {
    fn from_raw(raw: &[RawInterval]) -> Self {
        let mut grouped = Grouped::default();
        for interval in raw {
            match *interval {
                RawInterval::Base(span) => grouped.base.push(span.into()),
                RawInterval::ChangeStart(start) => grouped.start_shifts.push(start.minutes()),
                RawInterval::ChangeEnd(end) => grouped.end_shifts.push(end.minutes()),
                RawInterval::Change(span) => grouped.replacements.push(span.into()),
                RawInterval::Extra(span) => grouped.supplementary.push(span.into()),
            }
        }
        grouped
    }
}

/// Move the start of the base interval whose start is nearest to `new_start`.
fn apply_start_shift(base: &mut [MinuteSpan], new_start: u32) {
    if let Some(idx) = nearest_index(base.iter().map(|s| s.start), new_start) {
        base[idx].start = new_start;
    }
}

/// Move the end of the base interval whose end is nearest to `new_end`.
fn apply_end_shift(base: &mut [MinuteSpan], new_end: u32) {
    if let Some(idx) = nearest_index(base.iter().map(|s| s.end), new_end) {
        base[idx].end = new_end;
    }
}

/// Widen the first overlapping base interval, or append as a new one.
fn apply_replacement(base: &mut Vec<MinuteSpan>, replacement: MinuteSpan) {
    match base.iter_mut().find(|b| overlaps(**b, replacement)) {
        Some(existing) => *existing = existing.union(replacement),
        None => base.push(replacement),
    }
}

/// Reconcile one queue's raw intervals into its final schedule.
///
/// Returns an empty vector when nothing survives (for instance a queue
/// that only received shifts but has no base interval to move).
pub fn reconcile(raw: &[RawInterval]) -> Vec<Interval> {
    let Grouped {
        mut base,
        start_shifts,
        end_shifts,
        replacements,
        supplementary,
    } = Grouped::from_raw(raw);

    base.sort_by_key(|s| s.start);

    for new_start in start_shifts {
        apply_start_shift(&mut base, new_start);
    }
    for new_end in end_shifts {
        apply_end_shift(&mut base, new_end);
    }
    for replacement in replacements {
        apply_replacement(&mut base, replacement);
    }
    base.extend(supplementary);

    coalesce(base)
        .into_iter()
        .map(|span| Interval::from(span.to_span()))
        .collect()
}

/// Reconcile every queue, dropping queues left without intervals.
pub fn reconcile_all(raw: &BTreeMap<QueueId, Vec<RawInterval>>) -> BTreeMap<QueueId, Vec<Interval>> {
    raw.iter()
        .filter_map(|(queue, intervals)| {
            let merged = reconcile(intervals);
            (!merged.is_empty()).then_some((*queue, merged))
        })
        .collect()
}
