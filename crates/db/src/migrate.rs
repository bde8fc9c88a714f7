//! Applies module migrations against PostgreSQL, once each.

use bookshelf_kernel::Migration;
use sqlx::PgPool;

use crate::StoreError;

const CREATE_LEDGER: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        module     TEXT        NOT NULL,
        id         TEXT        NOT NULL,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (module, id)
    )
"#;

/// Apply every migration not yet recorded in `schema_migrations`, in the
/// order given. Each migration runs in its own transaction together with its
/// ledger entry. Returns how many were applied.
pub async fn apply_migrations(
    pool: &PgPool,
    migrations: &[(String, Migration)],
) -> Result<usize, StoreError> {
    sqlx::raw_sql(CREATE_LEDGER).execute(pool).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM schema_migrations WHERE module = $1 AND id = $2")
                .bind(module.as_str())
                .bind(migration.id)
                .fetch_optional(pool)
                .await?;

        if already.is_some() {
            tracing::debug!(target: "bookshelf-db", module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let wrap = |source: sqlx::Error| StoreError::Migration {
            module: module.clone(),
            id: migration.id.to_string(),
            source,
        };

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(wrap)?;
        sqlx::query("INSERT INTO schema_migrations (module, id) VALUES ($1, $2)")
            .bind(module.as_str())
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .map_err(wrap)?;
        tx.commit().await.map_err(wrap)?;

        tracing::info!(target: "bookshelf-db", module = %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
