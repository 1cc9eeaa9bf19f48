//! Metadata repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;

/// Metadata key holding the RFC 3339 time of the last successful save.
pub const LAST_UPDATED_KEY: &str = "last_updated";

/// Process-wide key/value metadata.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    async fn get_metadata(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// Insert or overwrite `key`.
    async fn set_metadata(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// Time of the last successful schedule save.
    async fn last_updated(&self) -> RepositoryResult<Option<String>> {
        self.get_metadata(LAST_UPDATED_KEY).await
    }
}
