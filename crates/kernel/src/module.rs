use async_trait::async_trait;
use axum::Router;

/// Context handed to modules while the application boots
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A schema change contributed by a module.
///
/// `id` must be unique within the owning module; the runner records it once
/// the statement batch in `up` has been applied.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// Unit of application wiring: routes, schema, and lifecycle hooks
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name, also used as the `/api/{name}` mount point
    fn name(&self) -> &'static str;

    /// Called once during startup, before any module is started
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// HTTP routes, mounted under `/api/{name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment (`paths` and `components`) merged into the served document
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Schema migrations, applied in the order returned
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Called after every module has been initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called on shutdown, after the HTTP server has drained
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
