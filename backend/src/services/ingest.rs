//! Block ingestion: parse announced blocks and persist what they yield.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::repository::{FullRepository, RepositoryError, ScheduleRepository};
use crate::models::ScheduleBlock;
use crate::parsing::ScheduleParser;

/// Errors from a whole ingestion batch.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// No block of the batch produced a single queue.
    #[error("Nothing to save: no queue schedule recognized in {} block(s)", .skipped_dates.len())]
    NothingToSave { skipped_dates: Vec<NaiveDate> },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Per-date result of an ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    /// Dates whose schedule was replaced, in block order.
    pub saved_dates: Vec<NaiveDate>,
    /// Dates whose block yielded no queues; their stored data is untouched.
    pub skipped_dates: Vec<NaiveDate>,
}

/// Parse every block and save the non-empty results.
///
/// A date whose block yields nothing keeps whatever was stored for it
/// before. The batch fails with [`IngestError::NothingToSave`] only when
/// no block produced anything.
pub async fn ingest_blocks(
    repo: &dyn FullRepository,
    parser: &ScheduleParser,
    blocks: &[ScheduleBlock],
) -> Result<IngestOutcome, IngestError> {
    let mut outcome = IngestOutcome::default();

    for schedule in parser.parse_blocks(blocks) {
        if schedule.is_empty() {
            warn!(date = %schedule.date, "No queue schedule recognized, nothing to save");
            outcome.skipped_dates.push(schedule.date);
            continue;
        }

        let inserted = repo.save_schedule(&schedule).await?;
        info!(
            date = %schedule.date,
            queues = schedule.queues.len(),
            intervals = inserted,
            has_message = schedule.message.is_some(),
            "Saved outage schedule"
        );
        if !outcome.saved_dates.contains(&schedule.date) {
            outcome.saved_dates.push(schedule.date);
        }
    }

    if outcome.saved_dates.is_empty() {
        return Err(IngestError::NothingToSave {
            skipped_dates: outcome.skipped_dates,
        });
    }

    Ok(outcome)
}
