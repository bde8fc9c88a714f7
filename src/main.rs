use anyhow::Context;
use bookshelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "bookshelf-app starting"
    );

    bookshelf_app::app::serve(&settings).await?;

    tracing::info!("bookshelf-app stopped");
    Ok(())
}
