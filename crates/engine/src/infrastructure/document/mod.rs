//! Document store adapters.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

use std::collections::HashSet;
use uuid::Uuid;

use crate::infrastructure::ports::{Collection, RepoError, Write, WriteBatch};

/// Reject batches that touch one document twice; the version checks of the
/// second write would be evaluated against state the first one replaced.
pub(crate) fn ensure_distinct_targets(batch: &WriteBatch) -> Result<(), RepoError> {
    let mut seen: HashSet<(Collection, Uuid)> = HashSet::new();
    for write in &batch.writes {
        let key = match write {
            Write::Put { collection, id, .. } | Write::Delete { collection, id, .. } => {
                (*collection, *id)
            }
        };
        if !seen.insert(key) {
            return Err(RepoError::database(
                "commit",
                format!("batch writes {} {} more than once", key.0, key.1),
            ));
        }
    }
    Ok(())
}
