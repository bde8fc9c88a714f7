//! REST surface of the books module.

use std::collections::BTreeSet;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use bookshelf_http::error::AppError;
use serde::Deserialize;
use serde_json::json;

use super::error::ListBooksError;
use super::graphql;
use super::models::{Book, BookListingRequest, SortDirection, SortField};
use super::service::BookCatalog;

#[derive(Clone)]
pub struct BooksState {
    pub catalog: BookCatalog,
    pub schema: graphql::BooksSchema,
}

/// Query string of `GET /api/books`.
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksParams {
    /// Comma separated author ids, e.g. `3,7`
    pub author_ids: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub sort_field: SortField,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl ListBooksParams {
    pub fn into_request(self) -> Result<BookListingRequest, AppError> {
        let author_ids = self
            .author_ids
            .as_deref()
            .map(parse_author_ids)
            .transpose()?;

        Ok(BookListingRequest {
            author_ids,
            search: self.search,
            limit: self.limit,
            offset: self.offset,
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
        })
    }
}

fn parse_author_ids(raw: &str) -> Result<BTreeSet<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                AppError::validation(
                    vec![json!({"field": "author_ids", "value": token})],
                    "author_ids must be a comma separated list of integers",
                )
            })
        })
        .collect()
}

impl From<ListBooksError> for AppError {
    fn from(err: ListBooksError) -> Self {
        match err {
            ListBooksError::InvalidArgument(reason) => AppError::validation(
                vec![json!({"code": "INVALID_ARGUMENT", "error": reason.clone()})],
                reason,
            ),
            ListBooksError::Timeout(_) => AppError::timeout(err.to_string()),
            ListBooksError::ExecutionFailure(_) | ListBooksError::MalformedRow { .. } => {
                AppError::Internal(anyhow::Error::new(err))
            }
        }
    }
}

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/health", get(health_check))
        .route("/graphql", post(graphql::graphql_handler))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

/// `GET /api/books`
async fn list_books(
    State(state): State<BooksState>,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(params) = params.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let request = params.into_request()?;
    let books = state.catalog.list(request).await?;
    Ok(Json(books))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_ids_are_split_trimmed_and_deduplicated() {
        let ids = parse_author_ids(" 3, 7,3 ,").unwrap();
        assert_eq!(ids, BTreeSet::from([3, 7]));
    }

    #[test]
    fn blank_author_ids_mean_no_filter() {
        let request = ListBooksParams {
            author_ids: Some(String::new()),
            ..Default::default()
        }
        .into_request()
        .unwrap();
        assert_eq!(request.author_ids, Some(BTreeSet::new()));
    }

    #[test]
    fn non_numeric_author_id_is_a_validation_error() {
        let err = parse_author_ids("1,two").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn absent_limit_stays_absent() {
        let request = ListBooksParams::default().into_request().unwrap();
        assert_eq!(request.limit, None);
        assert_eq!(request.offset, 0);
        assert_eq!(request.sort_field, SortField::Title);
    }

    #[test]
    fn listing_errors_map_to_http_errors() {
        let err: AppError = ListBooksError::invalid_argument("limit must be positive").into();
        assert!(matches!(err, AppError::Validation { ref message, .. } if message == "limit must be positive"));

        let err: AppError = ListBooksError::Timeout(std::time::Duration::from_secs(5)).into();
        assert!(matches!(err, AppError::Timeout { .. }));

        let err: AppError = ListBooksError::MalformedRow {
            row: 0,
            column: "title",
        }
        .into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
