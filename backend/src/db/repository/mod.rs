//! Repository traits for outage schedule persistence.
//!
//! - [`ScheduleRepository`]: per-date interval sets and operational messages
//! - [`MetadataRepository`]: process-wide key/value metadata such as
//!   the `last_updated` stamp
//! - [`FullRepository`]: everything a backend must provide

pub mod error;
pub mod metadata;
pub mod schedule;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use metadata::{MetadataRepository, LAST_UPDATED_KEY};
pub use schedule::ScheduleRepository;

/// A complete storage backend.
///
/// Blanket-implemented for every type implementing all repository traits,
/// so backends only implement the individual traits.
pub trait FullRepository: ScheduleRepository + MetadataRepository {}

impl<T> FullRepository for T where T: ScheduleRepository + MetadataRepository {}
