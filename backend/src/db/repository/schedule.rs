//! Schedule repository trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{Interval, ParsedSchedule, QueueId};

/// Storage of reconciled schedules, one replaceable set per date.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check that the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Replace everything stored for `schedule.date`.
    ///
    /// Removes the date's intervals and message, inserts the new ones
    /// (the message only when non-blank) and refreshes the `last_updated`
    /// metadata stamp, all in one unit.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of intervals stored
    /// * `Err(RepositoryError)` - If the operation fails
    async fn save_schedule(&self, schedule: &ParsedSchedule) -> RepositoryResult<usize>;

    /// Intervals of one queue on one date, ordered by start.
    ///
    /// An unknown date or a queue without outages gives an empty vector.
    async fn get_schedule(&self, queue: QueueId, date: NaiveDate)
        -> RepositoryResult<Vec<Interval>>;

    /// Every queue with at least one interval on `date`.
    async fn get_all_schedules(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<BTreeMap<QueueId, Vec<Interval>>>;

    /// Operational message stored for `date`, if any.
    async fn get_message(&self, date: NaiveDate) -> RepositoryResult<Option<String>>;

    /// Dates that have at least one interval, newest first.
    async fn list_dates(&self) -> RepositoryResult<Vec<NaiveDate>>;
}
