//! Book listing: validation, query planning, execution, and row mapping,
//! exposed over REST and GraphQL.

pub mod error;
pub mod executor;
pub mod graphql;
pub mod mapper;
pub mod models;
pub mod query;
pub mod routes;
pub mod service;
pub mod validator;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_db::Store;
use bookshelf_kernel::{InitCtx, Migration, Module};
use serde_json::json;

pub use error::ListBooksError;
pub use models::{Author, Book, BookListingRequest, SortDirection, SortField};
pub use service::{list_books, BookCatalog, ListingOptions};

pub struct BooksModule {
    catalog: BookCatalog,
}

impl BooksModule {
    pub fn new(catalog: BookCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            default_limit = self.catalog.options().default_limit,
            timeout_ms = self.catalog.options().timeout.as_millis() as u64,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(routes::BooksState {
            catalog: self.catalog.clone(),
            schema: graphql::build_schema(self.catalog.clone()),
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "author_ids",
                                "in": "query",
                                "description": "Comma separated author ids",
                                "schema": {"type": "string"}
                            },
                            {
                                "name": "search",
                                "in": "query",
                                "description": "Case-insensitive substring of the title",
                                "schema": {"type": "string"}
                            },
                            {
                                "name": "limit",
                                "in": "query",
                                "schema": {"type": "integer", "minimum": 1}
                            },
                            {
                                "name": "offset",
                                "in": "query",
                                "schema": {"type": "integer", "minimum": 0, "default": 0}
                            },
                            {
                                "name": "sort_field",
                                "in": "query",
                                "schema": {"type": "string", "enum": ["title", "author_name"], "default": "title"}
                            },
                            {
                                "name": "sort_direction",
                                "in": "query",
                                "schema": {"type": "string", "enum": ["asc", "desc"], "default": "asc"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Page of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {"$ref": "#/components/schemas/Book"}
                                        }
                                    }
                                }
                            },
                            "400": error_response("Malformed query string"),
                            "422": error_response("Invalid limit, offset, or author ids"),
                            "500": error_response("Store or mapping failure"),
                            "504": error_response("Query exceeded its time budget")
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {"text/plain": {"schema": {"type": "string"}}}
                            }
                        }
                    }
                },
                "/graphql": {
                    "post": {
                        "summary": "GraphQL endpoint exposing the `books` query",
                        "tags": ["Books"],
                        "responses": {
                            "200": {"description": "GraphQL response"}
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string", "description": "Author name at query time"}
                        },
                        "required": ["name"]
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "integer", "format": "int64"},
                            "title": {"type": "string"},
                            "author": {"$ref": "#/components/schemas/Author"}
                        },
                        "required": ["id", "title", "author"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS authors (
                    id   BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS books (
                    id        BIGSERIAL PRIMARY KEY,
                    title     TEXT   NOT NULL,
                    author_id BIGINT NOT NULL REFERENCES authors (id)
                );
                CREATE INDEX IF NOT EXISTS books_author_id_idx ON books (author_id);
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module over `store`
pub fn create_module(store: Arc<dyn Store>, options: ListingOptions) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(BookCatalog::new(store, options)))
}
