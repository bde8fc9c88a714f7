//! Store handle for bookshelf.
//!
//! Feature code talks to the database through the [`Store`] trait, which takes
//! SQL text plus positional [`SqlParam`]s and hands back [`RawRow`]s. The
//! production implementation is [`PgStore`], a thin wrapper over a sqlx
//! `PgPool`; tests substitute their own `Store`.

pub mod error;
pub mod migrate;
pub mod module;
pub mod postgres;
pub mod store;
pub mod value;

pub use error::StoreError;
pub use migrate::apply_migrations;
pub use module::DatabaseModule;
pub use postgres::PgStore;
pub use store::Store;
pub use value::{RawRow, SqlParam, SqlValue};
