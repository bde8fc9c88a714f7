//! GraphQL surface of the books module: a single `books` query.

use std::collections::BTreeSet;

use async_graphql::{Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;

use super::error::ListBooksError;
use super::models::{Book, BookListingRequest, SortDirection, SortField};
use super::routes::BooksState;
use super::service::BookCatalog;

pub type BooksSchema = Schema<BooksQuery, EmptyMutation, EmptySubscription>;

pub fn build_schema(catalog: BookCatalog) -> BooksSchema {
    Schema::build(BooksQuery, EmptyMutation, EmptySubscription)
        .data(catalog)
        .finish()
}

pub struct BooksQuery;

#[Object]
impl BooksQuery {
    /// Books, optionally filtered by author and title, sorted and paginated
    #[allow(clippy::too_many_arguments)]
    async fn books(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Only books by these authors; empty or null means all")]
        author_ids: Option<Vec<i64>>,
        #[graphql(desc = "Case-insensitive substring of the title")] search: Option<String>,
        #[graphql(default_with = "Some(100)", desc = "Page size; null uses the server default")]
        limit: Option<i64>,
        #[graphql(default)] offset: i64,
        #[graphql(default)] sort_field: SortField,
        #[graphql(default)] sort_direction: SortDirection,
    ) -> async_graphql::Result<Vec<Book>> {
        let catalog = ctx.data::<BookCatalog>()?;

        let request = BookListingRequest {
            author_ids: author_ids.map(|ids| ids.into_iter().collect::<BTreeSet<_>>()),
            search,
            limit,
            offset,
            sort_field,
            sort_direction,
        };

        catalog.list(request).await.map_err(into_graphql_error)
    }
}

fn into_graphql_error(err: ListBooksError) -> async_graphql::Error {
    let code = err.code();
    let message = match &err {
        ListBooksError::ExecutionFailure(_) | ListBooksError::MalformedRow { .. } => {
            "internal error while listing books".to_string()
        }
        _ => err.to_string(),
    };
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

pub async fn graphql_handler(
    State(state): State<BooksState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}
