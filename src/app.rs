use std::sync::Arc;

use anyhow::Context;
use bookshelf_db::{DatabaseModule, PgStore, Store};
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry with the database as the only core module and every feature
/// module on top of the same store.
pub fn build_registry(settings: &Settings, store: PgStore) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DatabaseModule::new(store.clone())));

    let store: Arc<dyn Store> = Arc::new(store);
    modules::register_all(&mut registry, store, settings);

    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "modules registered"
    );
    registry
}

/// Connect, boot every module, serve HTTP until shutdown, then stop modules
/// in reverse order.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let store = PgStore::connect(&settings.database)
        .await
        .context("failed to connect to the database")?;
    let registry = build_registry(settings, store);
    let ctx = InitCtx { settings };

    registry.init_core_modules(&ctx).await?;
    registry.init_custom_modules(&ctx).await?;
    registry.start_core_modules(&ctx).await?;
    registry.start_custom_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, settings).await;

    registry.stop_custom_modules().await?;
    registry.stop_core_modules().await?;

    served
}
