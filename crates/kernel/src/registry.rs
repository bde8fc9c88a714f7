use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Migration, Module};

/// Boot order for core modules. Anything registered as core but missing from
/// this list is never initialized, started, or stopped.
const CORE_MODULE_ORDER: &[&str] = &["db"];

/// Holds every registered module and drives their lifecycle
pub struct ModuleRegistry {
    core_modules: Vec<Arc<dyn Module>>,
    custom_modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            core_modules: Vec::new(),
            custom_modules: Vec::new(),
        }
    }

    /// Register infrastructure (database and friends)
    pub fn register_core(&mut self, module: Arc<dyn Module>) {
        self.core_modules.push(module);
    }

    /// Register a feature module
    pub fn register_custom(&mut self, module: Arc<dyn Module>) {
        self.custom_modules.push(module);
    }

    /// All modules, core first
    pub fn modules(&self) -> Vec<&Arc<dyn Module>> {
        self.core_modules
            .iter()
            .chain(self.custom_modules.iter())
            .collect()
    }

    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules().into_iter().find(|module| module.name() == name)
    }

    pub fn core_module_count(&self) -> usize {
        self.core_modules.len()
    }

    pub fn custom_module_count(&self) -> usize {
        self.custom_modules.len()
    }

    /// Core modules in boot order
    fn ordered_core(&self) -> impl DoubleEndedIterator<Item = &Arc<dyn Module>> {
        CORE_MODULE_ORDER.iter().filter_map(|&name| {
            self.core_modules
                .iter()
                .find(|module| module.name() == name)
        })
    }

    pub async fn init_core_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(order = ?CORE_MODULE_ORDER, "initializing core modules");

        for module in self.ordered_core() {
            tracing::info!(module = module.name(), "initializing core module");
            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize core module '{}'", module.name()))?;
        }

        Ok(())
    }

    pub async fn init_custom_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(count = self.custom_modules.len(), "initializing custom modules");

        for module in &self.custom_modules {
            tracing::info!(module = module.name(), "initializing custom module");
            module.init(ctx).await.with_context(|| {
                format!("failed to initialize custom module '{}'", module.name())
            })?;
        }

        Ok(())
    }

    pub async fn start_core_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in self.ordered_core() {
            tracing::info!(module = module.name(), "starting core module");
            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start core module '{}'", module.name()))?;
        }

        Ok(())
    }

    pub async fn start_custom_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in &self.custom_modules {
            tracing::info!(module = module.name(), "starting custom module");
            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start custom module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop custom modules, last registered first
    pub async fn stop_custom_modules(&self) -> anyhow::Result<()> {
        for module in self.custom_modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping custom module");
            module
                .stop()
                .await
                .with_context(|| format!("failed to stop custom module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop core modules in reverse boot order
    pub async fn stop_core_modules(&self) -> anyhow::Result<()> {
        for module in self.ordered_core().rev() {
            tracing::info!(module = module.name(), "stopping core module");
            module
                .stop()
                .await
                .with_context(|| format!("failed to stop core module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Every module's migrations tagged with the owning module name, sorted by
    /// module then migration id.
    pub fn collect_migrations(&self) -> Vec<(String, Migration)> {
        let mut migrations: Vec<(String, Migration)> = self
            .modules()
            .into_iter()
            .flat_map(|module| {
                let name = module.name().to_string();
                module
                    .migrations()
                    .into_iter()
                    .map(move |migration| (name.clone(), migration))
            })
            .collect();

        migrations.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(b.1.id)));
        migrations
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::sync::Mutex;

    struct RecordingModule {
        name: &'static str,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingModule {
        fn record(&self, event: &str) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:{}", event, self.name));
        }
    }

    #[async_trait::async_trait]
    impl Module for RecordingModule {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.record("init");
            Ok(())
        }

        async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.record("start");
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.record("stop");
            Ok(())
        }

        fn migrations(&self) -> Vec<Migration> {
            vec![
                Migration {
                    id: "002_index",
                    up: "CREATE INDEX t_idx ON t (id);",
                },
                Migration {
                    id: "001_init",
                    up: "CREATE TABLE t (id BIGINT);",
                },
            ]
        }
    }

    fn recording(name: &'static str, journal: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Module> {
        Arc::new(RecordingModule {
            name,
            journal: journal.clone(),
        })
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty());
        assert!(registry.collect_migrations().is_empty());
    }

    #[test]
    fn test_get_module_searches_core_and_custom() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register_core(recording("db", &journal));
        registry.register_custom(recording("books", &journal));

        assert_eq!(registry.core_module_count(), 1);
        assert_eq!(registry.custom_module_count(), 1);
        assert!(registry.get_module("db").is_some());
        assert!(registry.get_module("books").is_some());
        assert!(registry.get_module("users").is_none());
    }

    #[test]
    fn test_migrations_sorted_by_module_then_id() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register_custom(recording("books", &journal));
        registry.register_core(recording("db", &journal));

        let ids: Vec<(String, &str)> = registry
            .collect_migrations()
            .into_iter()
            .map(|(module, migration)| (module, migration.id))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("books".to_string(), "001_init"),
                ("books".to_string(), "002_index"),
                ("db".to_string(), "001_init"),
                ("db".to_string(), "002_index"),
            ]
        );
    }

    #[tokio::test]
    async fn test_module_lifecycle_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register_core(recording("db", &journal));
        registry.register_core(recording("unlisted", &journal));
        registry.register_custom(recording("books", &journal));
        registry.register_custom(recording("authors", &journal));

        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        registry.init_core_modules(&ctx).await.unwrap();
        registry.init_custom_modules(&ctx).await.unwrap();
        registry.start_core_modules(&ctx).await.unwrap();
        registry.start_custom_modules(&ctx).await.unwrap();
        registry.stop_custom_modules().await.unwrap();
        registry.stop_core_modules().await.unwrap();

        let journal = journal.lock().unwrap().clone();
        assert_eq!(
            journal,
            vec![
                "init:db",
                "init:books",
                "init:authors",
                "start:db",
                "start:books",
                "start:authors",
                "stop:authors",
                "stop:books",
                "stop:db",
            ]
        );
    }
}
