//! PostgreSQL implementation of [`Store`].

use std::time::Duration;

use async_trait::async_trait;
use bookshelf_kernel::settings::DatabaseSettings;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo};

use crate::{RawRow, SqlParam, SqlValue, Store, StoreError};

/// Pooled PostgreSQL handle
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool sized from settings
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            target: "bookshelf-db",
            max_connections = settings.max_connections,
            "connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
            .connect(&settings.url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial statement
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for PgStore {
    async fn execute(
        &self,
        sql: &str,
        params: &[SqlParam],
        timeout: Duration,
    ) -> Result<Vec<RawRow>, StoreError> {
        // `set_config(.., true)` scopes the timeout to this transaction, so the
        // server cancels the statement even if the caller stops polling.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT set_config('statement_timeout', $1, true)")
            .bind(timeout.as_millis().to_string())
            .execute(&mut *tx)
            .await?;

        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, param| bind_param(query, param));
        let rows = query.fetch_all(&mut *tx).await?;
        tx.commit().await?;

        rows.iter().map(decode_row).collect()
    }
}

fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &'q SqlParam,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        SqlParam::BigInt(value) => query.bind(*value),
        SqlParam::BigIntArray(value) => query.bind(value.clone()),
        SqlParam::Text(value) => query.bind(value.as_deref()),
    }
}

fn decode_row(row: &PgRow) -> Result<RawRow, StoreError> {
    let mut raw = RawRow::new();

    for column in row.columns() {
        let index = column.ordinal();
        let value = match column.type_info().name() {
            "INT8" => row.try_get::<Option<i64>, _>(index)?.map(SqlValue::Int),
            "INT4" => row
                .try_get::<Option<i32>, _>(index)?
                .map(|v| SqlValue::Int(v.into())),
            "INT2" => row
                .try_get::<Option<i16>, _>(index)?
                .map(|v| SqlValue::Int(v.into())),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                row.try_get::<Option<String>, _>(index)?.map(SqlValue::String)
            }
            "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(SqlValue::Float),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(index)?
                .map(|v| SqlValue::Float(v.into())),
            "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(SqlValue::Bool),
            other => {
                return Err(StoreError::UnsupportedColumn {
                    column: column.name().to_string(),
                    type_name: other.to_string(),
                })
            }
        };

        raw.insert(column.name(), value.unwrap_or(SqlValue::Null));
    }

    Ok(raw)
}
