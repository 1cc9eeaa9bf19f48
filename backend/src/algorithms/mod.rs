//! Interval algorithms for outage schedules.
//!
//! This module holds the pure computations behind schedule reconciliation.
//!
//! # Components
//!
//! - [`intervals`]: Overlap, nearest-match and coalescing on a minutes axis
//! - [`reconcile`]: Applying change announcements to the base schedule
//!
//! # Example
//!
//! ```
//! use outage_schedule::algorithms::reconcile;
//! use outage_schedule::models::{RawInterval, Span};
//!
//! let base = Span::new("10:00".parse().unwrap(), "15:00".parse().unwrap());
//! let change = Span::new("11:00".parse().unwrap(), "16:00".parse().unwrap());
//! let merged = reconcile(&[RawInterval::Base(base), RawInterval::Change(change)]);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].end.to_string(), "16:00");
//! ```

pub mod intervals;
pub mod reconcile;

pub use intervals::{coalesce, nearest_index, overlaps, MinuteSpan};
pub use reconcile::{reconcile, reconcile_all};
