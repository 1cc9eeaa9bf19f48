//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers / CLI and the repository layer:
//! they validate request input, run the schedule parser and derive the
//! figures the API reports.

pub mod clock;
pub mod hours;
pub mod ingest;
pub mod validation;

pub use clock::{now_timestamp, today, SERVICE_TIMEZONE};
pub use hours::total_hours_off;
pub use ingest::{ingest_blocks, IngestError, IngestOutcome};
pub use validation::{parse_date, parse_queue, ValidationError};
