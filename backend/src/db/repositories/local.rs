//! In-memory repository for unit testing and local development.
//!
//! Data lives for the lifetime of the process. Cloning a
//! [`LocalRepository`] shares the same underlying store.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::db::repository::{
    MetadataRepository, RepositoryResult, ScheduleRepository, LAST_UPDATED_KEY,
};
use crate::models::{clean_message, Interval, ParsedSchedule, QueueId};
use crate::services::clock::now_timestamp;

#[derive(Debug, Default)]
struct LocalData {
    schedules: BTreeMap<NaiveDate, BTreeMap<QueueId, Vec<Interval>>>,
    messages: HashMap<NaiveDate, String>,
    metadata: HashMap<String, String>,
}

/// In-memory repository.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
    healthy: Arc<AtomicBool>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Make `health_check` report the given state; lets tests simulate an
    /// unreachable backend.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Drop all stored data.
    pub fn clear(&self) {
        *self.data.write() = LocalData::default();
    }

    /// Number of dates holding at least one interval.
    pub fn date_count(&self) -> usize {
        self.data.read().schedules.len()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }

    async fn save_schedule(&self, schedule: &ParsedSchedule) -> RepositoryResult<usize> {
        let queues: BTreeMap<QueueId, Vec<Interval>> = schedule
            .queues
            .iter()
            .filter(|(_, intervals)| !intervals.is_empty())
            .map(|(queue, intervals)| {
                let mut intervals = intervals.clone();
                intervals.sort_by_key(|i| i.start);
                (*queue, intervals)
            })
            .collect();
        let inserted = queues.values().map(Vec::len).sum();

        let mut data = self.data.write();
        data.schedules.remove(&schedule.date);
        data.messages.remove(&schedule.date);

        if !queues.is_empty() {
            data.schedules.insert(schedule.date, queues);
        }
        if let Some(message) = schedule.message.as_deref().and_then(clean_message) {
            data.messages.insert(schedule.date, message);
        }
        data.metadata
            .insert(LAST_UPDATED_KEY.to_string(), now_timestamp());

        Ok(inserted)
    }

    async fn get_schedule(
        &self,
        queue: QueueId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Interval>> {
        let data = self.data.read();
        Ok(data
            .schedules
            .get(&date)
            .and_then(|queues| queues.get(&queue))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_all_schedules(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<BTreeMap<QueueId, Vec<Interval>>> {
        let data = self.data.read();
        Ok(data.schedules.get(&date).cloned().unwrap_or_default())
    }

    async fn get_message(&self, date: NaiveDate) -> RepositoryResult<Option<String>> {
        Ok(self.data.read().messages.get(&date).cloned())
    }

    async fn list_dates(&self) -> RepositoryResult<Vec<NaiveDate>> {
        Ok(self.data.read().schedules.keys().rev().copied().collect())
    }
}

#[async_trait]
impl MetadataRepository for LocalRepository {
    async fn get_metadata(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.data.read().metadata.get(key).cloned())
    }

    async fn set_metadata(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.data
            .write()
            .metadata
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
