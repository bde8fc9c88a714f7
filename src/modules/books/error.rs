use std::time::Duration;

use bookshelf_db::StoreError;
use thiserror::Error;

/// Ways a book listing can fail.
#[derive(Debug, Error)]
pub enum ListBooksError {
    /// The request itself is wrong; the caller can fix it.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("query exceeded its {}ms budget", .0.as_millis())]
    Timeout(Duration),

    /// The store failed. The cause is kept for logs and stays out of `Display`.
    #[error("query execution failed")]
    ExecutionFailure(#[source] StoreError),

    /// A row broke the `id` / `title` / `author_name` contract.
    #[error("row {row} has no usable `{column}` column")]
    MalformedRow { row: usize, column: &'static str },
}

impl ListBooksError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Stable machine-readable code, shared by the REST and GraphQL surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            ListBooksError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ListBooksError::Timeout(_) => "TIMEOUT",
            ListBooksError::ExecutionFailure(_) => "EXECUTION_FAILURE",
            ListBooksError::MalformedRow { .. } => "MALFORMED_ROW",
        }
    }
}
