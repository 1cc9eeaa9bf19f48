//! Repository factory for dependency injection.
//!
//! Picks a storage backend from the environment or a `repository.toml`
//! file and hands it out as `Arc<dyn FullRepository>`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::PostgresConfig;
use tracing::info;

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Diesel over a pooled Postgres connection
    Postgres,
    /// Process-local, in-memory
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts "postgres", "pg" or "local", case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            other => Err(format!("Unknown repository type: {}", other)),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Local => "local",
        })
    }
}

impl RepositoryType {
    /// Read `REPOSITORY_TYPE`; without it, Postgres when a database URL is
    /// present, otherwise Local. An unknown value falls back to Local.
    pub fn from_env() -> Self {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(raw) => raw.parse().unwrap_or(Self::Local),
            Err(_) if has_database_url() => Self::Postgres,
            Err(_) => Self::Local,
        }
    }
}

fn has_database_url() -> bool {
    ["DATABASE_URL", "PG_DATABASE_URL"]
        .iter()
        .any(|key| std::env::var(key).is_ok())
}

/// Builds the process repository.
///
/// # Example
/// ```
/// use outage_schedule::db::{RepositoryFactory, ScheduleRepository};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = RepositoryFactory::create_local();
///     assert!(repo.health_check().await.unwrap());
/// });
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the backend of the given type.
    ///
    /// `postgres_config` is required for [`RepositoryType::Postgres`].
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        info!(backend = %repo_type, "Creating repository");
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    RepositoryError::configuration("Postgres repository requires PostgresConfig")
                })?;
                Self::connect_postgres(config).await
            }
        }
    }

    /// Connect to Postgres and run pending migrations.
    ///
    /// Pool creation blocks, so it runs on the blocking thread pool.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        Ok(Arc::new(repo))
    }

    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create the repository selected by the environment
    /// (see [`RepositoryType::from_env`] and `PostgresConfig::from_env`).
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env();
        let postgres_config = match repo_type {
            RepositoryType::Postgres => Some(Self::postgres_config_from_env()?),
            RepositoryType::Local => None,
        };
        Self::create(repo_type, postgres_config.as_ref()).await
    }

    /// Create the repository described by a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::from_repository_config(&RepositoryConfig::from_file(config_path)?).await
    }

    /// Create the repository described by `repository.toml` in a standard
    /// location.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::from_repository_config(&RepositoryConfig::from_default_location()?).await
    }

    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        let postgres_config = config.to_postgres_config()?;
        Self::create(repo_type, postgres_config.as_ref()).await
    }

    #[cfg(feature = "postgres-repo")]
    async fn connect_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo: Arc<dyn FullRepository> = Self::create_postgres(config).await?;
        Ok(repo)
    }

    #[cfg(not(feature = "postgres-repo"))]
    async fn connect_postgres(
        _config: &PostgresConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        Err(postgres_disabled())
    }

    #[cfg(feature = "postgres-repo")]
    fn postgres_config_from_env() -> RepositoryResult<PostgresConfig> {
        PostgresConfig::from_env().map_err(RepositoryError::configuration)
    }

    #[cfg(not(feature = "postgres-repo"))]
    fn postgres_config_from_env() -> RepositoryResult<PostgresConfig> {
        Err(postgres_disabled())
    }
}

#[cfg(not(feature = "postgres-repo"))]
fn postgres_disabled() -> RepositoryError {
    RepositoryError::configuration("Postgres repository feature not enabled")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ScheduleRepository;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("postgres").unwrap(),
            RepositoryType::Postgres
        );
        assert_eq!(
            RepositoryType::from_str("Pg").unwrap(),
            RepositoryType::Postgres
        );
        assert!(RepositoryType::from_str("sqlite").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create(RepositoryType::Local, None)
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
        assert!(repo.list_dates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_repository_config_local() {
        let config = RepositoryConfig::from_toml("[repository]\ntype = \"local\"\n").unwrap();
        let repo = RepositoryFactory::from_repository_config(&config)
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[cfg(not(feature = "postgres-repo"))]
    #[tokio::test]
    async fn test_postgres_requires_feature() {
        let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
