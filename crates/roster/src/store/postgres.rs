use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, info};

use super::{DocumentStore, into_object};
use crate::errors::StoreError;

/// Document store backed by a single PostgreSQL `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `documents` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Document store migrations applied");
        Ok(())
    }

    /// Deletes every document in a collection.
    pub async fn clear(&self, collection: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn set(&self, collection: &str, id: &str, body: Value) -> Result<(), StoreError> {
        let map = into_object(collection, id, body)?;
        debug!(collection, id, "set document");

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (collection, id) DO UPDATE
            SET body = EXCLUDED.body, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(map)))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_with_server_timestamp(
        &self,
        collection: &str,
        id: &str,
        body: Value,
        field: &str,
    ) -> Result<(), StoreError> {
        let map = into_object(collection, id, body)?;
        debug!(collection, id, field, "set document with server timestamp");

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body, created_at, updated_at)
            VALUES ($1, $2, $3::jsonb || jsonb_build_object($4::text, NOW()), NOW(), NOW())
            ON CONFLICT (collection, id) DO UPDATE
            SET body = EXCLUDED.body, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(map)))
        .bind(field)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let body: Option<Json<Value>> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(body.map(|Json(v)| v))
    }

    async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as usize)
    }
}
