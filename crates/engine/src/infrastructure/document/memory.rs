//! In-memory document store.
//!
//! One lock guards every collection, so a commit checks all of its guards
//! and applies all of its writes without any other reader or writer in
//! between.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ensure_distinct_targets;
use crate::infrastructure::ports::{
    Collection, Document, DocumentStore, Expect, Filter, Guard, RepoError, Write, WriteBatch,
};

#[derive(Debug, Clone)]
struct Stored {
    version: u64,
    body: Value,
}

type Tables = HashMap<Collection, HashMap<Uuid, Stored>>;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    tables: RwLock<Tables>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_guard(tables: &Tables, guard: &Guard) -> Result<(), RepoError> {
    match guard {
        Guard::NoneMatch {
            collection,
            filters,
        } => {
            let hit = tables.get(collection).is_some_and(|docs| {
                docs.values()
                    .any(|doc| filters.iter().all(|f| f.matches(&doc.body)))
            });
            if hit {
                return Err(RepoError::conflict(format!(
                    "a matching document already exists in {}",
                    collection
                )));
            }
            Ok(())
        }
    }
}

fn check_write(tables: &Tables, write: &Write) -> Result<(), RepoError> {
    let (collection, id, expected) = match write {
        Write::Put {
            collection,
            id,
            expect,
            ..
        } => (*collection, *id, *expect),
        Write::Delete {
            collection,
            id,
            version,
        } => (*collection, *id, Expect::Version(*version)),
    };
    let current = tables
        .get(&collection)
        .and_then(|docs| docs.get(&id))
        .map(|doc| doc.version);

    match (expected, current) {
        (Expect::Absent, None) => Ok(()),
        (Expect::Version(v), Some(found)) if v == found => Ok(()),
        (Expect::Absent, Some(found)) => Err(RepoError::conflict(format!(
            "{} {} already exists at version {}",
            collection, id, found
        ))),
        (Expect::Version(v), Some(found)) => Err(RepoError::conflict(format!(
            "{} {} is at version {}, expected {}",
            collection, id, found, v
        ))),
        (Expect::Version(v), None) => Err(RepoError::conflict(format!(
            "{} {} no longer exists (expected version {})",
            collection, id, v
        ))),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&collection)
            .and_then(|docs| docs.get(&id))
            .map(|doc| Document {
                id,
                version: doc.version,
                body: doc.body.clone(),
            }))
    }

    async fn query(
        &self,
        collection: Collection,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, RepoError> {
        let tables = self.tables.read().await;
        let Some(docs) = tables.get(&collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| filters.iter().all(|f| f.matches(&doc.body)))
            .map(|(id, doc)| Document {
                id: *id,
                version: doc.version,
                body: doc.body.clone(),
            })
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError> {
        ensure_distinct_targets(&batch)?;

        let mut tables = self.tables.write().await;

        for guard in &batch.guards {
            check_guard(&tables, guard)?;
        }
        for write in &batch.writes {
            check_write(&tables, write)?;
        }

        for write in batch.writes {
            match write {
                Write::Put {
                    collection,
                    id,
                    body,
                    expect,
                } => {
                    let version = match expect {
                        Expect::Absent => 1,
                        Expect::Version(v) => v + 1,
                    };
                    tables
                        .entry(collection)
                        .or_default()
                        .insert(id, Stored { version, body });
                }
                Write::Delete { collection, id, .. } => {
                    if let Some(docs) = tables.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insert(batch: &mut WriteBatch, id: Uuid, body: Value) {
        batch.put(Collection::Units, id, body, Expect::Absent);
    }

    #[tokio::test]
    async fn insert_starts_at_version_one_and_put_increments() {
        let store = InMemoryDocumentStore::new();
        let id = Uuid::new_v4();

        let mut batch = WriteBatch::new();
        insert(&mut batch, id, json!({"health": 100}));
        store.commit(batch).await.unwrap();

        let doc = store.get(Collection::Units, id).await.unwrap().unwrap();
        assert_eq!(doc.version, 1);

        let mut batch = WriteBatch::new();
        batch.put(Collection::Units, id, json!({"health": 80}), Expect::Version(1));
        store.commit(batch).await.unwrap();

        let doc = store.get(Collection::Units, id).await.unwrap().unwrap();
        assert_eq!(doc.version, 2);
        assert_eq!(doc.body["health"], 80);
    }

    #[tokio::test]
    async fn stale_version_rejects_whole_batch() {
        let store = InMemoryDocumentStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let mut batch = WriteBatch::new();
        insert(&mut batch, a, json!({"health": 100}));
        insert(&mut batch, b, json!({"health": 100}));
        store.commit(batch).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.put(Collection::Units, a, json!({"health": 1}), Expect::Version(1));
        batch.put(Collection::Units, b, json!({"health": 1}), Expect::Version(7));
        let err = store.commit(batch).await.unwrap_err();

        assert!(err.is_conflict());
        let a_doc = store.get(Collection::Units, a).await.unwrap().unwrap();
        assert_eq!(a_doc.body["health"], 100);
        assert_eq!(a_doc.version, 1);
    }

    #[tokio::test]
    async fn delete_requires_current_version() {
        let store = InMemoryDocumentStore::new();
        let id = Uuid::new_v4();
        let mut batch = WriteBatch::new();
        insert(&mut batch, id, json!({}));
        store.commit(batch).await.unwrap();

        let mut stale = WriteBatch::new();
        stale.delete(Collection::Units, id, 3);
        assert!(store.commit(stale).await.unwrap_err().is_conflict());

        let mut current = WriteBatch::new();
        current.delete(Collection::Units, id, 1);
        store.commit(current).await.unwrap();
        assert!(store.get(Collection::Units, id).await.unwrap().is_none());

        let mut again = WriteBatch::new();
        again.delete(Collection::Units, id, 1);
        assert!(store.commit(again).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn none_match_guard_blocks_duplicates() {
        let store = InMemoryDocumentStore::new();
        let guard = || Guard::NoneMatch {
            collection: Collection::Players,
            filters: vec![Filter::eq("gameId", "g1"), Filter::eq("username", "ada")],
        };

        let mut first = WriteBatch::new();
        first.guard(guard()).put(
            Collection::Players,
            Uuid::new_v4(),
            json!({"gameId": "g1", "username": "ada"}),
            Expect::Absent,
        );
        store.commit(first).await.unwrap();

        let mut second = WriteBatch::new();
        second.guard(guard()).put(
            Collection::Players,
            Uuid::new_v4(),
            json!({"gameId": "g1", "username": "ada"}),
            Expect::Absent,
        );
        assert!(store.commit(second).await.unwrap_err().is_conflict());

        let players = store.query(Collection::Players, vec![]).await.unwrap();
        assert_eq!(players.len(), 1);
    }

    #[tokio::test]
    async fn query_applies_all_filters() {
        let store = InMemoryDocumentStore::new();
        let mut batch = WriteBatch::new();
        batch.put(Collection::Games, Uuid::new_v4(), json!({"createdAt": 10}), Expect::Absent);
        batch.put(Collection::Games, Uuid::new_v4(), json!({"createdAt": 20}), Expect::Absent);
        batch.put(Collection::Games, Uuid::new_v4(), json!({"createdAt": 30}), Expect::Absent);
        store.commit(batch).await.unwrap();

        let recent = store
            .query(Collection::Games, vec![Filter::gt("createdAt", 10)])
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);

        let none = store
            .query(Collection::Units, vec![Filter::eq("gameId", "x")])
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn batch_touching_one_document_twice_is_rejected() {
        let store = InMemoryDocumentStore::new();
        let id = Uuid::new_v4();
        let mut batch = WriteBatch::new();
        insert(&mut batch, id, json!({}));
        batch.delete(Collection::Units, id, 1);

        let err = store.commit(batch).await.unwrap_err();
        assert!(matches!(err, RepoError::Database { .. }));
    }
}
