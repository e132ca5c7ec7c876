//! SQLite-backed document store.
//!
//! All collections share one `documents` table keyed by `(collection, id)`.
//! Bodies are JSON text and filters compile to `json_extract` predicates.
//! Commits run in a `BEGIN IMMEDIATE` transaction, so the guard reads and
//! the writes of one batch see no interleaved writer.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::ensure_distinct_targets;
use crate::infrastructure::ports::{
    Collection, Document, DocumentStore, Expect, Filter, FilterOp, Guard, RepoError, Write,
    WriteBatch,
};

/// SQLite implementation of the document store.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (creating if needed) the database file at `db_path`.
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::with_pool(pool).await
    }

    /// Use an existing pool, creating the schema if it is missing.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                version INTEGER NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("schema", e))?;

        // Only the lookups the engine performs: gameId / playerId equality and
        // the createdAt range on games.
        for (name, field) in [
            ("idx_documents_game_id", "gameId"),
            ("idx_documents_player_id", "playerId"),
            ("idx_documents_created_at", "createdAt"),
        ] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS {name} ON documents (collection, json_extract(body, '$.{field}'))"
            ))
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;
        }

        Ok(Self { pool })
    }
}

// =============================================================================
// SQL helpers
// =============================================================================

enum SqlValue {
    Text(String),
    Int(i64),
    Real(f64),
}

/// Build the `AND ...` predicates for `filters`, plus the values to bind.
fn filter_clause(filters: &[Filter]) -> Result<(String, Vec<SqlValue>), RepoError> {
    let mut sql = String::new();
    let mut binds = Vec::with_capacity(filters.len());

    for filter in filters {
        if filter.field.is_empty() || !filter.field.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RepoError::database(
                "query",
                format!("unsupported filter field '{}'", filter.field),
            ));
        }
        let column = format!("json_extract(body, '$.{}')", filter.field);

        let value = match (&filter.value, filter.op) {
            (Value::Null, FilterOp::Eq) => {
                sql.push_str(&format!(" AND {} IS NULL", column));
                continue;
            }
            (Value::String(s), FilterOp::Eq) => SqlValue::Text(s.clone()),
            (Value::Bool(b), FilterOp::Eq) => SqlValue::Int(i64::from(*b)),
            (Value::Number(n), _) => match n.as_i64() {
                Some(i) => SqlValue::Int(i),
                None => SqlValue::Real(n.as_f64().unwrap_or_default()),
            },
            (other, op) => {
                return Err(RepoError::database(
                    "query",
                    format!("unsupported {:?} filter value {}", op, other),
                ))
            }
        };

        let op = match filter.op {
            FilterOp::Eq => "=",
            FilterOp::Gt => ">",
        };
        sql.push_str(&format!(" AND {} {} ?", column, op));
        binds.push(value);
    }

    Ok((sql, binds))
}

/// Lock contention and uniqueness violations are retryable conflicts;
/// everything else is a database failure.
fn classify(operation: &'static str) -> impl Fn(sqlx::Error) -> RepoError {
    move |e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return RepoError::conflict(db.message());
            }
            let primary = db
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);
            // SQLITE_BUSY / SQLITE_LOCKED
            if matches!(primary, Some(5) | Some(6)) {
                return RepoError::conflict(db.message());
            }
        }
        RepoError::database(operation, e)
    }
}

fn version_to_sql(version: u64) -> Result<i64, RepoError> {
    i64::try_from(version).map_err(|_| RepoError::database("commit", "version out of range"))
}

fn row_to_document(row: &SqliteRow) -> Result<Document, RepoError> {
    let id: String = row.try_get("id").map_err(RepoError::serialization)?;
    let version: i64 = row.try_get("version").map_err(RepoError::serialization)?;
    let body: String = row.try_get("body").map_err(RepoError::serialization)?;

    Ok(Document {
        id: id.parse().map_err(RepoError::serialization)?,
        version: u64::try_from(version).map_err(RepoError::serialization)?,
        body: serde_json::from_str(&body).map_err(RepoError::serialization)?,
    })
}

async fn check_guard(conn: &mut SqliteConnection, guard: &Guard) -> Result<(), RepoError> {
    match guard {
        Guard::NoneMatch {
            collection,
            filters,
        } => {
            let (clause, binds) = filter_clause(filters)?;
            let sql = format!(
                "SELECT EXISTS(SELECT 1 FROM documents WHERE collection = ?{}) AS hit",
                clause
            );
            let mut query = sqlx::query(&sql).bind(collection.as_str());
            for value in binds {
                query = match value {
                    SqlValue::Text(s) => query.bind(s),
                    SqlValue::Int(i) => query.bind(i),
                    SqlValue::Real(f) => query.bind(f),
                };
            }
            let row = query.fetch_one(&mut *conn).await.map_err(classify("guard"))?;
            let hit: i64 = row.try_get("hit").map_err(RepoError::serialization)?;
            if hit != 0 {
                return Err(RepoError::conflict(format!(
                    "a matching document already exists in {}",
                    collection
                )));
            }
            Ok(())
        }
    }
}

async fn apply_write(conn: &mut SqliteConnection, write: &Write) -> Result<(), RepoError> {
    match write {
        Write::Put {
            collection,
            id,
            body,
            expect: Expect::Absent,
        } => {
            sqlx::query(
                "INSERT INTO documents (collection, id, version, body) VALUES (?, ?, 1, ?)",
            )
            .bind(collection.as_str())
            .bind(id.to_string())
            .bind(body.to_string())
            .execute(&mut *conn)
            .await
            .map_err(classify("insert"))?;
            Ok(())
        }
        Write::Put {
            collection,
            id,
            body,
            expect: Expect::Version(version),
        } => {
            let result = sqlx::query(
                "UPDATE documents SET body = ?, version = version + 1 \
                 WHERE collection = ? AND id = ? AND version = ?",
            )
            .bind(body.to_string())
            .bind(collection.as_str())
            .bind(id.to_string())
            .bind(version_to_sql(*version)?)
            .execute(&mut *conn)
            .await
            .map_err(classify("update"))?;

            if result.rows_affected() == 0 {
                return Err(RepoError::conflict(format!(
                    "{} {} is no longer at version {}",
                    collection, id, version
                )));
            }
            Ok(())
        }
        Write::Delete {
            collection,
            id,
            version,
        } => {
            let result =
                sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ? AND version = ?")
                    .bind(collection.as_str())
                    .bind(id.to_string())
                    .bind(version_to_sql(*version)?)
                    .execute(&mut *conn)
                    .await
                    .map_err(classify("delete"))?;

            if result.rows_affected() == 0 {
                return Err(RepoError::conflict(format!(
                    "{} {} is no longer at version {}",
                    collection, id, version
                )));
            }
            Ok(())
        }
    }
}

async fn apply_batch(conn: &mut SqliteConnection, batch: &WriteBatch) -> Result<(), RepoError> {
    for guard in &batch.guards {
        check_guard(conn, guard).await?;
    }
    for write in &batch.writes {
        apply_write(conn, write).await?;
    }
    Ok(())
}

// =============================================================================
// Port implementation
// =============================================================================

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, RepoError> {
        let row = sqlx::query(
            "SELECT id, version, body FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(collection.as_str())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify("get"))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn query(
        &self,
        collection: Collection,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, RepoError> {
        let (clause, binds) = filter_clause(&filters)?;
        let sql = format!(
            "SELECT id, version, body FROM documents WHERE collection = ?{}",
            clause
        );

        let mut query = sqlx::query(&sql).bind(collection.as_str());
        for value in binds {
            query = match value {
                SqlValue::Text(s) => query.bind(s),
                SqlValue::Int(i) => query.bind(i),
                SqlValue::Real(f) => query.bind(f),
            };
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(classify("query"))?;
        rows.iter().map(row_to_document).collect()
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError> {
        ensure_distinct_targets(&batch)?;
        if batch.is_empty() {
            return Ok(());
        }

        // An uncommitted `tx` rolls back on drop, including when the caller
        // is cancelled mid-batch.
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(classify("begin"))?;

        apply_batch(&mut *tx, &batch).await?;
        tx.commit().await.map_err(classify("commit"))?;

        tracing::trace!(
            writes = batch.writes.len(),
            guards = batch.guards.len(),
            "Committed document batch"
        );
        Ok(())
    }
}
