//! Operational change classification.
//!
//! The change notice is a run of entries such as
//! `- у підчерги 1.1, 1.2 відключення розпочнеться раніше – о 09:00;`.
//! Each entry is classified into one [`Announcement`] and applied to the
//! queues it names.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::patterns::{
    capture_span, capture_time, END_SHIFT, ENTRY_QUEUES, ENTRY_SEPARATOR, FULL_REPLACEMENT,
    QUEUE_PAIR, START_SHIFT, SUPPLEMENTARY,
};
use crate::models::{QueueId, RawInterval, Span, TimeOfDay};

/// What a single change entry announces.
///
/// Variants are listed in matching priority: the first pattern that matches
/// an entry decides its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    /// Outage starts earlier and lasts until a new end.
    FullReplace(Span),
    /// Outage starts earlier, end unchanged.
    StartShift(TimeOfDay),
    /// Outage lasts longer, start unchanged.
    EndShift(TimeOfDay),
    /// Additional outage window.
    Supplementary(Span),
    Unrecognized,
}

/// A classified entry together with the queues it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub queues: Vec<QueueId>,
    pub announcement: Announcement,
}

/// Dedup key: each queue accepts at most one change of each keyed kind per
/// block. Supplementary windows are not keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKey {
    Full,
    Start,
    End,
}

/// Replace en and em dashes with a plain hyphen.
pub fn normalize_dashes(text: &str) -> String {
    text.replace(|c: char| c == '–' || c == '—', "-")
}

/// Split dash-normalized text into entries.
///
/// An entry ends where a dash (optionally preceded by `;.,:`) introduces a
/// new queue phrase; the phrase opens the next entry.
pub fn split_entries(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut cursor = 0;

    for caps in ENTRY_SEPARATOR.captures_iter(text) {
        if let (Some(separator), Some(phrase)) = (caps.get(0), caps.get(1)) {
            entries.push(&text[cursor..separator.start()]);
            cursor = phrase.start();
        }
    }
    entries.push(&text[cursor..]);

    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Queues named in an entry, in order of appearance.
pub fn entry_queues(entry: &str) -> Vec<QueueId> {
    ENTRY_QUEUES
        .captures_iter(entry)
        .filter_map(|caps| caps.get(1))
        .flat_map(|list| QUEUE_PAIR.find_iter(list.as_str()))
        .filter_map(|pair| pair.as_str().parse().ok())
        .collect()
}

/// Classify an entry's text.
///
/// A pattern that matches but carries an invalid time (e.g. `25:00`) makes
/// the entry unrecognized; lower-priority patterns are not tried.
pub fn classify(entry: &str) -> Announcement {
    if let Some(caps) = FULL_REPLACEMENT.captures(entry) {
        return capture_span(&caps)
            .map(Announcement::FullReplace)
            .unwrap_or(Announcement::Unrecognized);
    }
    if let Some(caps) = START_SHIFT.captures(entry) {
        return capture_time(&caps, 1)
            .map(Announcement::StartShift)
            .unwrap_or(Announcement::Unrecognized);
    }
    if let Some(caps) = END_SHIFT.captures(entry) {
        return capture_time(&caps, 1)
            .map(Announcement::EndShift)
            .unwrap_or(Announcement::Unrecognized);
    }
    if let Some(caps) = SUPPLEMENTARY.captures(entry) {
        return capture_span(&caps)
            .map(Announcement::Supplementary)
            .unwrap_or(Announcement::Unrecognized);
    }
    Announcement::Unrecognized
}

/// Parse an entry into its queues and announcement.
///
/// Entries naming no valid queue give `None`.
pub fn parse_entry(entry: &str) -> Option<ChangeEntry> {
    let queues = entry_queues(entry);
    if queues.is_empty() {
        return None;
    }
    Some(ChangeEntry {
        queues,
        announcement: classify(entry),
    })
}

/// Parse every entry of a change notice, dropping those without queues.
pub fn parse_changes(extras_text: &str) -> Vec<ChangeEntry> {
    let normalized = normalize_dashes(extras_text);
    split_entries(&normalized)
        .into_iter()
        .filter_map(|entry| {
            let parsed = parse_entry(entry);
            if parsed.is_none() {
                debug!(entry, "Skipping change entry without queue reference");
            }
            parsed
        })
        .collect()
}

/// Record one entry's change for each of its queues, honouring dedup keys.
fn apply_entry(
    entry: &ChangeEntry,
    applied: &mut HashSet<(QueueId, ChangeKey)>,
    queues: &mut BTreeMap<QueueId, Vec<RawInterval>>,
) {
    for &queue in &entry.queues {
        let raw = match entry.announcement {
            Announcement::FullReplace(span) => {
                if !applied.insert((queue, ChangeKey::Full)) {
                    continue;
                }
                RawInterval::Change(span)
            }
            Announcement::StartShift(start) => {
                if applied.contains(&(queue, ChangeKey::Full))
                    || !applied.insert((queue, ChangeKey::Start))
                {
                    continue;
                }
                RawInterval::ChangeStart(start)
            }
            Announcement::EndShift(end) => {
                if !applied.insert((queue, ChangeKey::End)) {
                    continue;
                }
                RawInterval::ChangeEnd(end)
            }
            Announcement::Supplementary(span) => RawInterval::Extra(span),
            Announcement::Unrecognized => return,
        };
        queues.entry(queue).or_default().push(raw);
    }
}

/// Append the raw change intervals announced in `extras_text` to `queues`.
///
/// Dedup state lives only for this call.
pub fn apply_changes(extras_text: &str, queues: &mut BTreeMap<QueueId, Vec<RawInterval>>) {
    let mut applied = HashSet::new();
    for entry in parse_changes(extras_text) {
        debug!(
            queues = ?entry.queues,
            announcement = ?entry.announcement,
            "Classified change entry"
        );
        apply_entry(&entry, &mut applied, queues);
    }
}
