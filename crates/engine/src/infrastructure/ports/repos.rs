//! Document store port.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::RepoError;
use super::types::{Collection, Document, Filter, WriteBatch};

// =============================================================================
// Document Store
// =============================================================================

/// Get by id, query by field, and atomic guarded commits.
///
/// `commit` applies every write in the batch or none of them. A failed guard
/// or stale version is reported as [`RepoError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, RepoError>;

    /// All documents of `collection` matching every filter, in no particular order.
    async fn query(
        &self,
        collection: Collection,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, RepoError>;

    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError>;
}
