//! Storage for reconciled outage schedules.
//!
//! Persistence goes through the Repository pattern so the in-memory and
//! Postgres backends are interchangeable.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / ingest CLI                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  services.rs - high-level operations                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  repository/ - ScheduleRepository + MetadataRepository  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!      ┌──────────────┴───────────────┐
//!      │ LocalRepository (in-memory)  │
//!      │ PostgresRepository (diesel)  │
//!      └──────────────────────────────┘
//! ```
//!
//! The process-wide repository is created once with [`init_repository`]
//! from `REPOSITORY_TYPE` / `DATABASE_URL` and fetched with
//! [`get_repository`].

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, FullRepository, MetadataRepository, RepositoryError, RepositoryResult,
    ScheduleRepository, LAST_UPDATED_KEY,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository from the environment.
///
/// Calling it again returns the already initialized instance.
pub async fn init_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if let Some(repo) = REPOSITORY.get() {
        return Ok(repo);
    }

    let repo = RepositoryFactory::from_env()
        .await
        .context("Failed to initialize repository")?;
    Ok(REPOSITORY.get_or_init(|| repo))
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
