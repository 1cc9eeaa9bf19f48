//! Data Transfer Objects for the HTTP API.
//!
//! Field names follow the public JSON contract consumed by client apps.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Interval, QueueId, ScheduleBlock};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Data freshness summary returned by `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    /// Timestamp of the most recent save
    pub last_scrape: Option<String>,
    pub available_dates: Vec<NaiveDate>,
    pub total_queues: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesResponse {
    pub dates: Vec<NaiveDate>,
}

/// Whether any interval is stored for the requested queue and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    NoData,
}

impl ScheduleStatus {
    pub fn from_intervals(intervals: &[Interval]) -> Self {
        if intervals.is_empty() {
            Self::NoData
        } else {
            Self::Active
        }
    }
}

/// One queue's schedule for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueScheduleResponse {
    pub queue: QueueId,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
    pub intervals: Vec<Interval>,
    pub operational_message: Option<String>,
    pub last_updated: Option<String>,
    pub total_hours_off: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSummary {
    pub intervals: Vec<Interval>,
    pub total_hours_off: f64,
}

/// Every queue with data for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllSchedulesResponse {
    pub date: NaiveDate,
    pub last_updated: Option<String>,
    pub operational_message: Option<String>,
    pub queues: BTreeMap<QueueId, QueueSummary>,
}

/// Request body for `POST /v1/blocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub blocks: Vec<ScheduleBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    /// Dates whose schedule was replaced
    pub dates: Vec<NaiveDate>,
    /// Dates that produced no queue and kept their previous data
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_dates: Vec<NaiveDate>,
    pub message: String,
    pub last_updated: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ScheduleStatus::NoData).unwrap(),
            "\"no_data\""
        );
        assert_eq!(ScheduleStatus::from_intervals(&[]), ScheduleStatus::NoData);
    }

    #[test]
    fn test_all_schedules_keys_are_queue_strings() {
        let mut queues = BTreeMap::new();
        queues.insert(
            "2.1".parse::<QueueId>().unwrap(),
            QueueSummary {
                intervals: vec![],
                total_hours_off: 0.0,
            },
        );
        let response = AllSchedulesResponse {
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            last_updated: None,
            operational_message: None,
            queues,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["date"], "2026-01-15");
        assert!(json["queues"]["2.1"].is_object());
    }

    #[test]
    fn test_ingest_request_defaults_extras() {
        let request: IngestRequest = serde_json::from_str(
            r#"{"blocks": [{"date": "2026-01-15", "schedule_text": "підчерга 1.1 – з 10:00 до 15:00"}]}"#,
        )
        .unwrap();
        assert_eq!(request.blocks.len(), 1);
        assert!(request.blocks[0].extras_text.is_empty());
    }
}
