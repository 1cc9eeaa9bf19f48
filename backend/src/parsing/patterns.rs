//! Recognition patterns for announcement text.
//!
//! Compiled once per process and shared read-only by every parse.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{Span, TimeOfDay};

/// `підчерга 1.1` on a base schedule line.
pub(crate) static QUEUE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)підчерга\s+(\d\.\d)").expect("QUEUE_MARKER should compile - this is a bug")
});

/// `з 10:00 до 15:00`.
pub(crate) static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"з\s*(\d{1,2}:\d{2})\s*до\s*(\d{1,2}:\d{2})")
        .expect("TIME_RANGE should compile - this is a bug")
});

/// Dash introducing the next change entry. Group 1 is the queue phrase the
/// entry starts with; the separator itself is everything before it.
pub(crate) static ENTRY_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[;.,:]?\s*-\s*(у\s+підчерг|підчерг[иуа])")
        .expect("ENTRY_SEPARATOR should compile - this is a bug")
});

/// Queue list following `підчерги` / `підчергу` / `підчерга`.
pub(crate) static ENTRY_QUEUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)підчерг[иуа]?\s+([\d.\s,]+)")
        .expect("ENTRY_QUEUES should compile - this is a bug")
});

pub(crate) static QUEUE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\.\d").expect("QUEUE_PAIR should compile - this is a bug"));

/// "...раніше - об 11:00 і триватиме до 16:00"
pub(crate) static FULL_REPLACEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)раніше\s*-?\s*об?\s*(\d{1,2}:\d{2}).+?триватиме\s+до\s*(\d{1,2}:\d{2})")
        .expect("FULL_REPLACEMENT should compile - this is a bug")
});

/// "розпочнеться раніше - о 20:00"
pub(crate) static START_SHIFT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)розпочнеться\s+раніше\s*-?\s*об?\s*(\d{1,2}:\d{2})")
        .expect("START_SHIFT should compile - this is a bug")
});

/// "триватиме довше - до 11:00", also "...довше - заживлення о 11:00"
pub(crate) static END_SHIFT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)триватиме\s+довше\s*-?\s*(?:до|заживлення.+?об?)\s*(\d{1,2}:\d{2})")
        .expect("END_SHIFT should compile - this is a bug")
});

/// "додатково буде знеструмлено з 16:00 до 18:00"
pub(crate) static SUPPLEMENTARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)додатково.+?з\s*(\d{1,2}:\d{2})\s*до\s*(\d{1,2}:\d{2})")
        .expect("SUPPLEMENTARY should compile - this is a bug")
});

/// Parse capture group `idx` as a time of day.
pub(crate) fn capture_time(caps: &Captures<'_>, idx: usize) -> Option<TimeOfDay> {
    caps.get(idx)?.as_str().parse().ok()
}

/// Parse capture groups 1 and 2 as a start/end pair.
pub(crate) fn capture_span(caps: &Captures<'_>) -> Option<Span> {
    Some(Span::new(capture_time(caps, 1)?, capture_time(caps, 2)?))
}

/// Every well-formed `з T до T` range in `text`, in source order.
pub fn time_ranges(text: &str) -> Vec<Span> {
    TIME_RANGE
        .captures_iter(text)
        .filter_map(|caps| capture_span(&caps))
        .collect()
}
