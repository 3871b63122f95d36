//! Document repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide asynchronous CRUD over the `documents` table.
//! - Keep SQL and blocking I/O off the caller's task.
//!
//! # Invariants
//! - `fetch_all` returns documents ordered by id ascending.
//! - `insert_many` assigns ids and commits the whole batch or nothing.
//! - `update`/`remove` on an unknown id reject with `NotFound`.
//! - Failures are returned once; there is no retry.

use crate::db::{self, DbError, SharedConnection};
use crate::model::document::{Document, DocumentId, NewDocument};
use async_trait::async_trait;
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{spawn_blocking, JoinError};

const DOCUMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    doc_type,
    owner,
    department,
    uploaded_at,
    size_bytes
FROM documents";

pub type RepoResult<T> = Result<T, RepoError>;

/// Document repository failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(DocumentId),
    InvalidData(String),
    /// The blocking worker running the query panicked or was cancelled.
    Task(JoinError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted document data: {message}"),
            Self::Task(err) => write!(f, "document repository task failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<JoinError> for RepoError {
    fn from(value: JoinError) -> Self {
        Self::Task(value)
    }
}

/// Asynchronous document persistence.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Loads every stored document.
    async fn fetch_all(&self) -> RepoResult<Vec<Document>>;
    /// Stores new documents and returns them with their assigned ids.
    async fn insert_many(&self, documents: Vec<NewDocument>) -> RepoResult<Vec<Document>>;
    /// Replaces the stored document with the same id.
    async fn update(&self, document: &Document) -> RepoResult<()>;
    /// Deletes the stored document with `id`.
    async fn remove(&self, id: DocumentId) -> RepoResult<()>;
}

/// SQLite-backed document repository.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    conn: SharedConnection,
}

impl SqliteDocumentRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    async fn run<T, F>(&self, operation: &'static str, job: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let started_at = Instant::now();
        let result = spawn_blocking(move || -> RepoResult<T> {
            let mut guard = db::lock(&conn)?;
            job(&mut *guard)
        })
        .await
        .map_err(RepoError::from)
        .and_then(|inner| inner);

        match &result {
            Ok(_) => debug!(
                "event=doc_repo module=repo status=ok op={operation} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=doc_repo module=repo status=error op={operation} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn fetch_all(&self) -> RepoResult<Vec<Document>> {
        self.run("fetch_all", |conn| {
            let mut stmt = conn.prepare(&format!("{DOCUMENT_SELECT_SQL} ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut documents = Vec::new();
            while let Some(row) = rows.next()? {
                documents.push(parse_document_row(row)?);
            }
            Ok(documents)
        })
        .await
    }

    async fn insert_many(&self, documents: Vec<NewDocument>) -> RepoResult<Vec<Document>> {
        self.run("insert_many", move |conn| {
            let tx = conn.transaction()?;
            let mut stored = Vec::with_capacity(documents.len());
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO documents (
                        name,
                        doc_type,
                        owner,
                        department,
                        uploaded_at,
                        size_bytes
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                )?;
                for document in documents {
                    validate_new_document(&document)?;
                    stmt.execute(params![
                        document.name.as_str(),
                        document.kind.as_str(),
                        document.owner.as_str(),
                        document.department.as_deref(),
                        document.uploaded_at.as_deref(),
                        document.size_bytes,
                    ])?;
                    stored.push(document.with_id(tx.last_insert_rowid()));
                }
            }
            tx.commit()?;
            Ok(stored)
        })
        .await
    }

    async fn update(&self, document: &Document) -> RepoResult<()> {
        let document = document.clone();
        self.run("update", move |conn| {
            let changed = conn.execute(
                "UPDATE documents
                 SET
                    name = ?1,
                    doc_type = ?2,
                    owner = ?3,
                    department = ?4,
                    uploaded_at = ?5,
                    size_bytes = ?6
                 WHERE id = ?7;",
                params![
                    document.name.as_str(),
                    document.kind.as_str(),
                    document.owner.as_str(),
                    document.department.as_deref(),
                    document.uploaded_at.as_deref(),
                    document.size_bytes,
                    document.id,
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(document.id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: DocumentId) -> RepoResult<()> {
        self.run("remove", move |conn| {
            let changed = conn.execute("DELETE FROM documents WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn validate_new_document(document: &NewDocument) -> RepoResult<()> {
    if document.name.trim().is_empty() {
        return Err(RepoError::InvalidData(
            "document name must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let size_bytes: Option<i64> = row.get("size_bytes")?;
    if let Some(size) = size_bytes.filter(|size| *size < 0) {
        return Err(RepoError::InvalidData(format!(
            "negative size `{size}` in documents.size_bytes"
        )));
    }

    Ok(Document {
        id: row.get("id")?,
        name: row.get("name")?,
        kind: row.get("doc_type")?,
        owner: row.get("owner")?,
        department: row.get("department")?,
        uploaded_at: row.get("uploaded_at")?,
        size_bytes,
    })
}
