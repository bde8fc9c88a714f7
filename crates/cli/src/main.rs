//! `bookshelf` command line: migrate the schema, serve the API, or list books
//! straight from the database.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Context;
use bookshelf_app::books::{BookCatalog, BookListingRequest, ListingOptions, SortDirection, SortField};
use bookshelf_db::{apply_migrations, PgStore};
use bookshelf_kernel::settings::Settings;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about = "Bookshelf service tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending schema migrations
    Migrate,

    /// Run the HTTP server
    Serve,

    /// List books and print them as JSON
    Books(BooksArgs),
}

#[derive(Args, Debug)]
struct BooksArgs {
    /// Only books by these authors (repeat or comma separate)
    #[arg(long = "author-id", value_delimiter = ',')]
    author_ids: Vec<i64>,

    /// Case-insensitive title substring
    #[arg(long)]
    search: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    #[arg(long, value_enum, default_value_t = SortFieldArg::Title)]
    sort_field: SortFieldArg,

    #[arg(long, value_enum, default_value_t = SortDirectionArg::Asc)]
    sort_direction: SortDirectionArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortFieldArg {
    Title,
    AuthorName,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortDirectionArg {
    Asc,
    Desc,
}

impl From<SortFieldArg> for SortField {
    fn from(arg: SortFieldArg) -> Self {
        match arg {
            SortFieldArg::Title => SortField::Title,
            SortFieldArg::AuthorName => SortField::AuthorName,
        }
    }
}

impl From<SortDirectionArg> for SortDirection {
    fn from(arg: SortDirectionArg) -> Self {
        match arg {
            SortDirectionArg::Asc => SortDirection::Asc,
            SortDirectionArg::Desc => SortDirection::Desc,
        }
    }
}

impl BooksArgs {
    fn into_request(self) -> BookListingRequest {
        let author_ids = if self.author_ids.is_empty() {
            None
        } else {
            Some(self.author_ids.into_iter().collect::<BTreeSet<_>>())
        };

        BookListingRequest {
            author_ids,
            search: self.search,
            limit: self.limit,
            offset: self.offset,
            sort_field: self.sort_field.into(),
            sort_direction: self.sort_direction.into(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Migrate => migrate(&settings).await,
        Command::Serve => bookshelf_app::app::serve(&settings).await,
        Command::Books(args) => list_books(&settings, args).await,
    }
}

async fn migrate(settings: &Settings) -> anyhow::Result<()> {
    let store = PgStore::connect(&settings.database)
        .await
        .context("failed to connect to the database")?;
    let registry = bookshelf_app::app::build_registry(settings, store.clone());

    let migrations = registry.collect_migrations();
    let applied = apply_migrations(store.pool(), &migrations).await?;
    tracing::info!(applied, total = migrations.len(), "migrations complete");

    store.close().await;
    Ok(())
}

async fn list_books(settings: &Settings, args: BooksArgs) -> anyhow::Result<()> {
    let store = PgStore::connect(&settings.database)
        .await
        .context("failed to connect to the database")?;
    let catalog = BookCatalog::new(
        Arc::new(store.clone()),
        ListingOptions::from(&settings.books),
    );

    let books = catalog.list(args.into_request()).await?;
    println!("{}", serde_json::to_string_pretty(&books)?);

    store.close().await;
    Ok(())
}
