//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint. Reads go straight to the
//! repository through `db::services`; ingestion goes through the service
//! layer.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::dto::{
    AllSchedulesResponse, DatesResponse, HealthResponse, IngestRequest, IngestResponse,
    QueueScheduleResponse, QueueSummary, ScheduleStatus, StatusResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::QueueId;
use crate::services::{self, parse_date, parse_queue, total_hours_off};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health / Status
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// GET /status
///
/// Data freshness: last save timestamp and the dates currently stored.
pub async fn status(State(state): State<AppState>) -> HandlerResult<StatusResponse> {
    let repo = state.repository.as_ref();
    let last_scrape = db_services::last_updated(repo).await?;
    let available_dates = db_services::list_dates(repo).await?;

    Ok(Json(StatusResponse {
        status: "healthy".to_string(),
        last_scrape,
        available_dates,
        total_queues: QueueId::all().count(),
    }))
}

// =============================================================================
// Schedules
// =============================================================================

/// GET /v1/dates
pub async fn list_dates(State(state): State<AppState>) -> HandlerResult<DatesResponse> {
    let dates = db_services::list_dates(state.repository.as_ref()).await?;
    Ok(Json(DatesResponse { dates }))
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: Option<String>,
}

/// GET /v1/schedule/{queue}
///
/// Schedule for today in Kyiv, unless `?day=YYYY-MM-DD` is given.
pub async fn get_today_schedule(
    State(state): State<AppState>,
    Path(queue): Path<String>,
    Query(query): Query<DayQuery>,
) -> HandlerResult<QueueScheduleResponse> {
    let queue = parse_queue(&queue)?;
    let date = match query.day.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => services::today(),
    };
    queue_schedule(&state, queue, date).await
}

/// GET /v1/schedule/{queue}/{day}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path((queue, day)): Path<(String, String)>,
) -> HandlerResult<QueueScheduleResponse> {
    let queue = parse_queue(&queue)?;
    let date = parse_date(&day)?;
    queue_schedule(&state, queue, date).await
}

async fn queue_schedule(
    state: &AppState,
    queue: QueueId,
    date: NaiveDate,
) -> HandlerResult<QueueScheduleResponse> {
    let repo = state.repository.as_ref();
    let intervals = db_services::get_schedule(repo, queue, date).await?;
    let operational_message = db_services::get_message(repo, date).await?;
    let last_updated = db_services::last_updated(repo).await?;

    Ok(Json(QueueScheduleResponse {
        queue,
        date,
        status: ScheduleStatus::from_intervals(&intervals),
        total_hours_off: total_hours_off(&intervals),
        intervals,
        operational_message,
        last_updated,
    }))
}

/// GET /v1/all/{day}
///
/// Every queue with stored intervals for the date; queues without data are
/// omitted.
pub async fn get_all_schedules(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> HandlerResult<AllSchedulesResponse> {
    let date = parse_date(&day)?;
    let repo = state.repository.as_ref();

    let queues = db_services::get_all_schedules(repo, date)
        .await?
        .into_iter()
        .map(|(queue, intervals)| {
            let summary = QueueSummary {
                total_hours_off: total_hours_off(&intervals),
                intervals,
            };
            (queue, summary)
        })
        .collect();

    Ok(Json(AllSchedulesResponse {
        date,
        last_updated: db_services::last_updated(repo).await?,
        operational_message: db_services::get_message(repo, date).await?,
        queues,
    }))
}

// =============================================================================
// Ingestion
// =============================================================================

/// POST /v1/blocks
///
/// Parse the posted date blocks and replace the stored schedule of every
/// date that yielded at least one queue.
pub async fn ingest_blocks(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> HandlerResult<IngestResponse> {
    let repo = state.repository.as_ref();
    let outcome = services::ingest_blocks(repo, &state.parser, &request.blocks).await?;

    Ok(Json(IngestResponse {
        status: "success".to_string(),
        message: format!("Оновлено графіки для {} дат", outcome.saved_dates.len()),
        dates: outcome.saved_dates,
        skipped_dates: outcome.skipped_dates,
        last_updated: db_services::last_updated(repo).await?,
    }))
}
