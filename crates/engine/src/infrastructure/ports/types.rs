//! Vocabulary of the document store port.
//!
//! Documents are schemaless JSON bodies addressed by `(collection, id)`. The
//! store owns each document's `version`: it starts at 1 on insert and grows
//! by one on every successful put. Writers state which version they read,
//! and the store refuses the whole batch if any of those reads went stale.

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Collections and Documents
// =============================================================================

/// The three flat top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Games,
    Players,
    Units,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Games, Collection::Players, Collection::Units];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Players => "players",
            Self::Units => "units",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document with its current version.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub version: u64,
    pub body: Value,
}

// =============================================================================
// Queries
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
}

/// A single top-level field predicate. Queries AND their filters together.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt,
            value: value.into(),
        }
    }

    /// Evaluate against a document body. Only numbers are ordered; `Gt` on
    /// anything else never matches.
    pub fn matches(&self, body: &Value) -> bool {
        let Some(actual) = body.get(&self.field) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => actual == &self.value,
            FilterOp::Gt => match (actual.as_f64(), self.value.as_f64()) {
                (Some(a), Some(b)) => a > b,
                _ => false,
            },
        }
    }
}

// =============================================================================
// Guarded Writes
// =============================================================================

/// What the writer believes about a document before writing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Document must not exist yet
    Absent,
    /// Document must exist at exactly this version
    Version(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Put {
        collection: Collection,
        id: Uuid,
        body: Value,
        expect: Expect,
    },
    Delete {
        collection: Collection,
        id: Uuid,
        version: u64,
    },
}

/// A predicate over the collection as a whole, checked at commit time.
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// No document in `collection` matches every filter
    NoneMatch {
        collection: Collection,
        filters: Vec<Filter>,
    },
}

/// Writes committed all together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    pub guards: Vec<Guard>,
    pub writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty() && self.writes.is_empty()
    }

    pub fn guard(&mut self, guard: Guard) -> &mut Self {
        self.guards.push(guard);
        self
    }

    pub fn put(&mut self, collection: Collection, id: Uuid, body: Value, expect: Expect) -> &mut Self {
        self.writes.push(Write::Put {
            collection,
            id,
            body,
            expect,
        });
        self
    }

    pub fn delete(&mut self, collection: Collection, id: Uuid, version: u64) -> &mut Self {
        self.writes.push(Write::Delete {
            collection,
            id,
            version,
        });
        self
    }
}
