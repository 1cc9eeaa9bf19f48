//! Base schedule extraction.
//!
//! Reads the tabular part of an announcement, where each line normally looks
//! like `підчерга 3.1 – з 04:00 до 09:00, з 18:00 до 23:00;`.

use std::collections::BTreeMap;

use tracing::debug;

use super::patterns::{time_ranges, QUEUE_MARKER};
use crate::models::{QueueId, RawInterval};

/// Queue marker found inside a scanning window.
struct Marker {
    offset: usize,
    queue: Option<QueueId>,
}

/// Extract base intervals per queue from the schedule table text.
///
/// Lines are scanned independently. When the line pass yields nothing, the
/// whole text is scanned as a single window, which recovers tables whose
/// markers and times were split over several lines.
pub fn extract_base(schedule_text: &str) -> BTreeMap<QueueId, Vec<RawInterval>> {
    let mut queues = BTreeMap::new();

    for line in schedule_text.lines() {
        scan_window(line, Prefix::Owned, &mut queues);
    }

    if queues.is_empty() && !schedule_text.trim().is_empty() {
        debug!("No queue lines recognized, scanning schedule text as one window");
        scan_window(schedule_text, Prefix::Ignored, &mut queues);
    }

    queues
}

/// Who gets the text before the first marker of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    /// The first marker; a single table line belongs to its queue.
    Owned,
    /// Nobody; in a whole-text scan it is header prose.
    Ignored,
}

/// Assign the time ranges of `window` to the queues marked in it.
///
/// Each marker owns the text up to the next marker. A segment with ranges
/// replaces the queue's entry, a segment without any leaves it alone.
fn scan_window(window: &str, prefix: Prefix, queues: &mut BTreeMap<QueueId, Vec<RawInterval>>) {
    let markers: Vec<Marker> = QUEUE_MARKER
        .captures_iter(window)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let pair = caps.get(1)?;
            Some(Marker {
                offset: whole.start(),
                queue: pair.as_str().parse().ok(),
            })
        })
        .collect();

    for (idx, marker) in markers.iter().enumerate() {
        let Some(queue) = marker.queue else {
            continue;
        };
        let start = if idx == 0 && prefix == Prefix::Owned {
            0
        } else {
            marker.offset
        };
        let end = markers
            .get(idx + 1)
            .map(|next| next.offset)
            .unwrap_or(window.len());

        let intervals: Vec<RawInterval> = time_ranges(&window[start..end])
            .into_iter()
            .map(RawInterval::Base)
            .collect();
        if !intervals.is_empty() {
            queues.insert(queue, intervals);
        }
    }
}
