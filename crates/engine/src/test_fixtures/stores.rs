//! Document store wrappers for concurrency tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::infrastructure::ports::{
    Collection, Document, DocumentStore, Filter, RepoError, WriteBatch,
};

/// Yields to the scheduler after every read, so operations joined on one
/// task interleave between their reads and their commits.
pub struct YieldingStore {
    inner: Arc<dyn DocumentStore>,
}

impl YieldingStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DocumentStore for YieldingStore {
    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, RepoError> {
        let doc = self.inner.get(collection, id).await;
        tokio::task::yield_now().await;
        doc
    }

    async fn query(
        &self,
        collection: Collection,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, RepoError> {
        let docs = self.inner.query(collection, filters).await;
        tokio::task::yield_now().await;
        docs
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError> {
        self.inner.commit(batch).await
    }
}

/// Reads pass through; every commit reports contention.
pub struct ContendedStore {
    inner: Arc<dyn DocumentStore>,
    commits: AtomicU32,
}

impl ContendedStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            commits: AtomicU32::new(0),
        }
    }

    pub fn commit_attempts(&self) -> u32 {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for ContendedStore {
    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, RepoError> {
        self.inner.get(collection, id).await
    }

    async fn query(
        &self,
        collection: Collection,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, RepoError> {
        self.inner.query(collection, filters).await
    }

    async fn commit(&self, _batch: WriteBatch) -> Result<(), RepoError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        Err(RepoError::conflict("database is locked"))
    }
}
