//! Wall-clock helpers pinned to the service timezone.
//!
//! "Today" and the `last_updated` stamp follow local time of the
//! distribution company, not the host's timezone.

use chrono::{NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;

pub const SERVICE_TIMEZONE: Tz = chrono_tz::Europe::Kyiv;

/// Current calendar date in Kyiv.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&SERVICE_TIMEZONE).date_naive()
}

/// Current Kyiv time as an RFC 3339 string with a UTC offset,
/// e.g. `2026-01-15T22:11:42+02:00`.
pub fn now_timestamp() -> String {
    Utc::now()
        .with_timezone(&SERVICE_TIMEZONE)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_timestamp_is_rfc3339() {
        let stamp = now_timestamp();
        let parsed = DateTime::parse_from_rfc3339(&stamp).unwrap();
        let offset_hours = parsed.offset().local_minus_utc() / 3600;
        assert!(offset_hours == 2 || offset_hours == 3);
    }

    #[test]
    fn test_today_close_to_utc_date() {
        let utc = Utc::now().date_naive();
        let kyiv = today();
        assert!(kyiv == utc || kyiv == utc.succ_opt().unwrap());
    }
}
