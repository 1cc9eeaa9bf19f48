//! High-level database operations used by the HTTP layer and the CLI.
//!
//! Each function works with any [`FullRepository`] implementation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::repository::{
    FullRepository, MetadataRepository, RepositoryResult, ScheduleRepository,
};
use crate::models::{Interval, ParsedSchedule, QueueId};

pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Replace the stored schedule for `schedule.date`.
pub async fn save_schedule(
    repo: &dyn FullRepository,
    schedule: &ParsedSchedule,
) -> RepositoryResult<usize> {
    repo.save_schedule(schedule).await
}

pub async fn get_schedule(
    repo: &dyn FullRepository,
    queue: QueueId,
    date: NaiveDate,
) -> RepositoryResult<Vec<Interval>> {
    repo.get_schedule(queue, date).await
}

pub async fn get_all_schedules(
    repo: &dyn FullRepository,
    date: NaiveDate,
) -> RepositoryResult<BTreeMap<QueueId, Vec<Interval>>> {
    repo.get_all_schedules(date).await
}

pub async fn get_message(
    repo: &dyn FullRepository,
    date: NaiveDate,
) -> RepositoryResult<Option<String>> {
    repo.get_message(date).await
}

/// Dates with stored intervals, newest first.
pub async fn list_dates(repo: &dyn FullRepository) -> RepositoryResult<Vec<NaiveDate>> {
    repo.list_dates().await
}

pub async fn last_updated(repo: &dyn FullRepository) -> RepositoryResult<Option<String>> {
    repo.last_updated().await
}
