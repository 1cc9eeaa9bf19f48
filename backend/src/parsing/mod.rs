//! Parsers for outage announcement text.
//!
//! This module turns the utility's Ukrainian-language announcements into
//! per-queue outage intervals.
//!
//! # Parsers
//!
//! - [`base`]: Extract the base schedule table (`підчерга 1.1 – з 10:00 до 15:00`)
//! - [`changes`]: Classify operational change entries (earlier start, longer
//!   outage, full change, additional outage)
//! - [`parser`]: Run both stages and reconcile the result for one date
//! - [`patterns`]: The shared recognition patterns
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use outage_schedule::models::{QueueId, ScheduleBlock};
//! use outage_schedule::parsing::ScheduleParser;
//!
//! let block = ScheduleBlock::new(
//!     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
//!     "підчерга 1.1 – з 10:00 до 15:00;",
//!     "- у підчергу 1.1 відключення триватиме довше – до 16:00;",
//! );
//! let parsed = ScheduleParser::new().parse_block(&block);
//! let q11: QueueId = "1.1".parse().unwrap();
//! assert_eq!(parsed.intervals(q11)[0].end.to_string(), "16:00");
//! ```

pub mod base;
pub mod changes;
pub mod parser;
pub mod patterns;

#[cfg(test)]
mod base_tests;

pub use base::extract_base;
pub use changes::{apply_changes, classify, parse_changes, Announcement, ChangeEntry, ChangeKey};
pub use parser::{parse_block, ScheduleParser};
