//! Error types for the store layer.

use thiserror::Error;

/// SQLSTATE raised by PostgreSQL when `statement_timeout` cancels a query.
const QUERY_CANCELED: &str = "57014";

/// Errors that can occur while talking to the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver-level failure: connectivity, malformed SQL, constraint violation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A result column has a type the row decoder does not handle.
    #[error("unsupported type `{type_name}` for column `{column}`")]
    UnsupportedColumn { column: String, type_name: String },

    /// A migration batch failed to apply.
    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Whether the store itself gave up on the statement because it ran past
    /// its time budget.
    pub fn is_timeout(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some(QUERY_CANCELED)
            }
            _ => false,
        }
    }
}
