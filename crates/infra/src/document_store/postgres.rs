//! Postgres-backed document store.
//!
//! All collections share one `documents` table; the document body is JSONB and
//! the store-assigned id lives in the `id` column (never inside `body`).
//! The table is created on first use, so a database that was down at startup
//! only needs to come back; nothing has to be restarted.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | PoolTimedOut, PoolClosed, Io, Tls | `Unavailable` |
//! | Database, decode and anything else | `Backend` |

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder, Row};
use tokio::sync::OnceCell;
use tracing::instrument;
use uuid::Uuid;

use masterpiece_core::{Document, DocumentId};

use super::{stamp, with_id, Condition, DocumentFilter, DocumentStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id          UUID PRIMARY KEY,
    collection  TEXT        NOT NULL,
    body        JSONB       NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)";

/// Postgres-backed document store.
///
/// `PgPool` is internally reference counted; cloning the store shares the pool
/// and the schema state.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
    schema: Arc<OnceCell<()>>,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// Build a lazily-connecting pool so an unreachable database does not
    /// prevent startup; failures surface per request as `Unavailable`.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `documents` table and its index if missing.
    ///
    /// Every store operation awaits this first. Once it succeeds it is not run
    /// again; a failed attempt is retried by the next caller.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema.get_or_try_init(|| self.create_schema()).await?;
        Ok(())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema.initialized()
    }

    async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        sqlx::query(CREATE_INDEX)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

/// `SELECT id, body` for one collection with the filter compiled to SQL,
/// in insertion order.
fn select_documents<'a>(collection: &'a str, filter: &'a DocumentFilter) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
    qb.push_bind(collection);

    for condition in filter.conditions() {
        match condition {
            Condition::Eq { field, value } => {
                qb.push(" AND (body -> ");
                qb.push_bind(field.as_str());
                qb.push(" = ");
                qb.push_bind(Json(value));
                qb.push(" OR (jsonb_typeof(body -> ");
                qb.push_bind(field.as_str());
                qb.push(") = 'array' AND body -> ");
                qb.push_bind(field.as_str());
                qb.push(" @> jsonb_build_array(");
                qb.push_bind(Json(value));
                qb.push(")))");
            }
            Condition::ContainsIgnoreCase { field, needle } => {
                // `->>` would render numbers as text; only string fields match.
                qb.push(" AND jsonb_typeof(body -> ");
                qb.push_bind(field.as_str());
                qb.push(") = 'string' AND body ->> ");
                qb.push_bind(field.as_str());
                qb.push(" ILIKE ");
                qb.push_bind(format!("%{}%", escape_like(needle)));
            }
        }
    }

    qb.push(" ORDER BY created_at, id");
    qb
}

/// Escape LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn row_to_document(row: &PgRow) -> Result<Document, StoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode id", e))?;
    let Json(body): Json<Document> = row
        .try_get("body")
        .map_err(|e| map_sqlx_error("decode body", e))?;
    Ok(with_id(body, DocumentId::from(id)))
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self, document), err)]
    async fn insert(&self, collection: &str, mut document: Document) -> Result<DocumentId, StoreError> {
        self.ensure_schema().await?;

        let id = DocumentId::new();
        let now = Utc::now();
        stamp(&mut document, now);

        sqlx::query("INSERT INTO documents (id, collection, body, created_at) VALUES ($1, $2, $3, $4)")
            .bind(id.as_uuid())
            .bind(collection)
            .bind(Json(&document))
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(id)
    }

    #[instrument(skip(self), err)]
    async fn query(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError> {
        self.ensure_schema().await?;

        let rows = select_documents(collection, filter)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("query", e))?;

        rows.iter().map(row_to_document).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_one(&self, collection: &str, filter: &DocumentFilter) -> Result<Option<Document>, StoreError> {
        self.ensure_schema().await?;

        let mut qb = select_documents(collection, filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_one", e))?;

        row.as_ref().map(row_to_document).transpose()
    }

    #[instrument(skip(self), err)]
    async fn count_all(&self, collection: &str) -> Result<u64, StoreError> {
        self.ensure_schema().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_all", e))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self), err)]
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_schema().await?;

        sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_collections", e))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        sqlx::Error::Database(db_err) => {
            StoreError::Backend(format!("database error in {operation}: {}", db_err.message()))
        }
        other => StoreError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::Executor;

    /// Store on a fresh Postgres schema that has no `documents` table yet.
    async fn empty_database_store() -> PostgresDocumentStore {
        let url = std::env::var("DATABASE_URL").unwrap();
        let schema = format!("test_{}", DocumentId::new().as_uuid().simple());

        let admin = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
        admin.execute(format!("CREATE SCHEMA {schema}").as_str()).await.unwrap();

        let search_path = format!("SET search_path TO {schema}");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    conn.execute(search_path.as_str()).await?;
                    Ok(())
                })
            })
            .connect_lazy(&url)
            .unwrap();
        PostgresDocumentStore::new(pool)
    }

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
        assert_eq!(escape_like("iris"), "iris");
    }

    #[test]
    fn unfiltered_select_only_scopes_collection() {
        let filter = DocumentFilter::all();
        let qb = select_documents("product", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY created_at, id"
        );
    }

    #[test]
    fn filters_compile_to_bound_parameters() {
        let filter = DocumentFilter::all()
            .eq("collections", json!("drop-001"))
            .contains_ignore_case("title", "iris");
        let qb = select_documents("product", &filter);
        let sql = qb.sql();

        assert!(sql.contains("jsonb_build_array($6)"), "{sql}");
        assert!(sql.contains("jsonb_typeof(body -> $7) = 'string'"), "{sql}");
        assert!(sql.contains("body ->> $8 ILIKE $9"), "{sql}");
        assert!(sql.ends_with("ORDER BY created_at, id"), "{sql}");
        assert!(!sql.contains("drop-001"));
    }

    #[tokio::test]
    async fn unreachable_database_leaves_schema_pending() {
        let store = PostgresDocumentStore::connect_lazy("postgres://masterpiece@127.0.0.1:1/none", 1).unwrap();

        let err = store.count_all("product").await.unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)), "{err:?}");
        assert!(!store.schema_ready());
    }

    #[tokio::test]
    #[ignore = "requires a Postgres instance at DATABASE_URL"]
    async fn empty_database_is_initialized_on_first_use() {
        let store = empty_database_store().await;
        assert!(!store.schema_ready());

        assert_eq!(store.count_all("product").await.unwrap(), 0);
        assert!(store.schema_ready());

        store.insert("product", doc(json!({"slug": "void-seraph"}))).await.unwrap();
        assert_eq!(store.count_all("product").await.unwrap(), 1);
        assert_eq!(store.list_collections().await.unwrap(), ["product"]);
    }

    #[tokio::test]
    #[ignore = "requires a Postgres instance at DATABASE_URL"]
    async fn filters_and_order_match_in_memory_semantics() {
        let store = empty_database_store().await;

        let first = store
            .insert("product", doc(json!({"title": "Neon Oracle", "collections": ["drop-002"]})))
            .await
            .unwrap();
        store
            .insert("product", doc(json!({"title": "Eclipse Relic Hoodie", "collections": ["drop-002"]})))
            .await
            .unwrap();
        store.insert("product", doc(json!({"title": 404}))).await.unwrap();

        let drop = store
            .query("product", &DocumentFilter::all().eq("collections", "drop-002"))
            .await
            .unwrap();
        assert_eq!(drop.len(), 2);
        assert_eq!(drop[0]["_id"], json!(first.to_string()));

        let hits = store
            .query("product", &DocumentFilter::all().contains_ignore_case("title", "ORACLE"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let numeric = store
            .query("product", &DocumentFilter::all().contains_ignore_case("title", "40"))
            .await
            .unwrap();
        assert!(numeric.is_empty());
    }
}
