use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{daily_messages, metadata, queues, schedules};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = queues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QueueRow {
    pub id: i32,
    pub name: String,
}

/// One stored interval joined with its queue name.
#[derive(Debug, Clone, Queryable)]
pub struct IntervalRow {
    pub queue: String,
    pub start_time: String,
    pub end_time: String,
    pub interval_type: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedules)]
pub struct NewIntervalRow {
    pub queue_id: i32,
    pub day_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub interval_type: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_messages)]
pub struct NewDailyMessageRow {
    pub day_date: NaiveDate,
    pub message: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = metadata)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MetadataRow {
    pub key: String,
    pub value: Option<String>,
}
