//! Tracing bootstrap for bookshelf binaries.

use anyhow::Context;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured filter.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = resolve_filter(std::env::var("RUST_LOG").ok().as_deref(), &settings.filter)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    }
    .context("failed to install tracing subscriber")?;

    tracing::info!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

fn resolve_filter(from_env: Option<&str>, configured: &str) -> anyhow::Result<EnvFilter> {
    match from_env.filter(|directive| !directive.trim().is_empty()) {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid RUST_LOG directive '{directive}'")),
        None => EnvFilter::try_new(configured)
            .with_context(|| format!("invalid telemetry.filter directive '{configured}'")),
    }
}
