use std::sync::Arc;
use std::time::Duration;

use bookshelf_db::Store;
use bookshelf_kernel::settings::BooksSettings;

use super::error::ListBooksError;
use super::models::{Book, BookListingRequest, DEFAULT_PAGE_SIZE};
use super::{executor, mapper, query, validator};

/// Per-deployment knobs the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    /// Bound as LIMIT when the request has none
    pub default_limit: i64,
    pub timeout: Duration,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(5),
        }
    }
}

impl From<&BooksSettings> for ListingOptions {
    fn from(settings: &BooksSettings) -> Self {
        Self {
            default_limit: settings.default_limit,
            timeout: Duration::from_millis(settings.query_timeout_ms),
        }
    }
}

/// Validate, plan, execute, and map one listing request.
#[tracing::instrument(
    name = "list_books",
    skip_all,
    fields(
        sort_field = ?request.sort_field,
        sort_direction = ?request.sort_direction,
        limit = ?request.limit,
        offset = request.offset,
    )
)]
pub async fn list_books(
    store: &dyn Store,
    request: BookListingRequest,
    options: &ListingOptions,
) -> Result<Vec<Book>, ListBooksError> {
    let request = validator::validate(request)?;
    let plan = query::build_plan(&request, options);
    let rows = executor::execute(store, &plan).await?;
    let books = mapper::map_rows(rows)?;

    tracing::debug!(count = books.len(), "books listed");
    Ok(books)
}

/// The listing pipeline bound to a store; what the API surfaces hold on to.
#[derive(Clone)]
pub struct BookCatalog {
    store: Arc<dyn Store>,
    options: ListingOptions,
}

impl BookCatalog {
    pub fn new(store: Arc<dyn Store>, options: ListingOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub async fn list(&self, request: BookListingRequest) -> Result<Vec<Book>, ListBooksError> {
        list_books(self.store.as_ref(), request, &self.options).await
    }
}
