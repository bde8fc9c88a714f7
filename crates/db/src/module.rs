use async_trait::async_trait;
use bookshelf_kernel::{InitCtx, Module};

use crate::PgStore;

/// Core module owning the connection pool's lifecycle
pub struct DatabaseModule {
    store: PgStore,
}

impl DatabaseModule {
    pub fn new(store: PgStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for DatabaseModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.store.ping().await?;
        tracing::info!(
            target: "bookshelf-db",
            max_connections = ctx.settings.database.max_connections,
            "database reachable"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.store.close().await;
        tracing::info!(target: "bookshelf-db", "connection pool closed");
        Ok(())
    }
}
