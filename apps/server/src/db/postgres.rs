//! PostgreSQL document store
//!
//! All collections share one `documents` table keyed by `(collection, id)`
//! with a `jsonb` body. Filters use the `@>` containment operator, which the
//! GIN index on `body` serves. The table lives in the schema named by
//! `database.name`.

use super::traits::{Collection, DocumentStore, Filter, Sort, SortDirection};
use crate::config::{is_valid_schema_name, DatabaseConfig};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the pool with `search_path` pinned to the configured schema,
    /// creates the schema and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if !is_valid_schema_name(&config.name) {
            return Err(Error::Internal(format!(
                "invalid schema name '{}'",
                config.name
            )));
        }

        let options = PgConnectOptions::from_str(&config.url)?
            .options([("search_path", config.name.as_str())]);

        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .connect_with(options)
            .await?;

        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", config.name))
            .execute(&pool)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!(schema = %config.name, "Database migrations applied");
        }

        Ok(Self::new(pool))
    }
}

fn order_clause(sort: Option<Sort>) -> &'static str {
    match sort.map(|s| s.direction) {
        Some(SortDirection::Ascending) => "ORDER BY body -> $3 ASC NULLS LAST, seq ASC",
        Some(SortDirection::Descending) => "ORDER BY body -> $3 DESC NULLS LAST, seq ASC",
        None => "ORDER BY seq ASC",
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: Collection, id: &str, document: JsonValue) -> Result<()> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.name())
            .bind(id)
            .bind(document)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<JsonValue>> {
        let row: Option<(JsonValue,)> = sqlx::query_as(
            "SELECT body FROM documents \
             WHERE collection = $1 AND body @> $2 \
             ORDER BY seq ASC LIMIT 1",
        )
        .bind(collection.name())
        .bind(filter.as_json())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(body,)| body))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<JsonValue>> {
        let sql = format!(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 {}",
            order_clause(sort)
        );
        let mut query = sqlx::query_as::<_, (JsonValue,)>(&sql)
            .bind(collection.name())
            .bind(filter.as_json());
        if let Some(sort) = sort {
            query = query.bind(sort.field);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(body,)| body).collect())
    }

    async fn replace(
        &self,
        collection: Collection,
        id: &str,
        document: JsonValue,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE documents SET body = $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<Option<JsonValue>> {
        let row: Option<(JsonValue,)> = sqlx::query_as(
            "UPDATE documents SET body = body || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 \
             RETURNING body",
        )
        .bind(collection.name())
        .bind(id)
        .bind(JsonValue::Object(fields))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(body,)| body))
    }

    async fn push_element(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        element: JsonValue,
    ) -> Result<Option<JsonValue>> {
        let row: Option<(JsonValue,)> = sqlx::query_as(
            "UPDATE documents SET body = jsonb_set(body, ARRAY[$3::text], \
                 CASE WHEN jsonb_typeof(body -> $3::text) = 'array' \
                      THEN body -> $3::text ELSE '[]'::jsonb END \
                 || jsonb_build_array($4::jsonb)), \
             updated_at = NOW() \
             WHERE collection = $1 AND id = $2 \
             RETURNING body",
        )
        .bind(collection.name())
        .bind(id)
        .bind(field)
        .bind(element)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(body,)| body))
    }

    async fn pull_element(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        element_id: &str,
    ) -> Result<Option<JsonValue>> {
        let row: Option<(JsonValue,)> = sqlx::query_as(
            "UPDATE documents SET body = CASE \
                 WHEN jsonb_typeof(body -> $3::text) = 'array' THEN jsonb_set(body, ARRAY[$3::text], ( \
                     SELECT COALESCE(jsonb_agg(e ORDER BY ord), '[]'::jsonb) \
                     FROM jsonb_array_elements(body -> $3::text) WITH ORDINALITY AS t(e, ord) \
                     WHERE e ->> 'id' IS DISTINCT FROM $4::text)) \
                 ELSE body END, \
             updated_at = NOW() \
             WHERE collection = $1 AND id = $2 \
             RETURNING body",
        )
        .bind(collection.name())
        .bind(id)
        .bind(field)
        .bind(element_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(body,)| body))
    }

    async fn upsert(&self, collection: Collection, id: &str, document: JsonValue) -> Result<()> {
        sqlx::query(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) \
             DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()",
        )
        .bind(collection.name())
        .bind(id)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND body @> $2")
            .bind(collection.name())
            .bind(filter.as_json())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM documents WHERE collection = $1 AND body @> $2",
        )
        .bind(collection.name())
        .bind(filter.as_json())
        .fetch_one(&self.pool)
        .await?;
        Ok(count.max(0) as u64)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
