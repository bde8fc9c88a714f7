#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bookshelf_app::books::{SortDirection, SortField};
use bookshelf_db::{RawRow, SqlParam, SqlValue, Store, StoreError};

/// One joined books/authors row.
#[derive(Debug, Clone)]
pub struct FixtureBook {
    pub id: i64,
    pub title: &'static str,
    pub author_id: i64,
    pub author_name: &'static str,
}

pub fn book(id: i64, title: &'static str, author_id: i64, author_name: &'static str) -> FixtureBook {
    FixtureBook {
        id,
        title,
        author_id,
        author_name,
    }
}

/// A recorded `execute` call.
#[derive(Debug, Clone)]
pub struct Call {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// In-memory store that answers the listing statement the way PostgreSQL
/// would: typed-NULL filters, ILIKE with `\` escapes, ORDER BY with the id
/// tie-break, then LIMIT/OFFSET.
#[derive(Default)]
pub struct FixtureStore {
    books: Vec<FixtureBook>,
    calls: Mutex<Vec<Call>>,
}

impl FixtureStore {
    pub fn new(books: Vec<FixtureBook>) -> Self {
        Self {
            books,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn shared(books: Vec<FixtureBook>) -> Arc<Self> {
        Arc::new(Self::new(books))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn order(sql: &str) -> (SortField, SortDirection) {
        for field in [SortField::Title, SortField::AuthorName] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let clause = format!("ORDER BY {} {}", field.column(), direction.keyword());
                if sql.contains(&clause) {
                    return (field, direction);
                }
            }
        }
        panic!("statement has no recognised ORDER BY: {sql}");
    }
}

fn unescape_like(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[async_trait]
impl Store for FixtureStore {
    async fn execute(
        &self,
        sql: &str,
        params: &[SqlParam],
        _timeout: Duration,
    ) -> Result<Vec<RawRow>, StoreError> {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        let author_ids = params[0].as_i64_slice();
        let needle = params[1].as_str().map(|p| unescape_like(p).to_lowercase());
        let limit = params[2].as_i64().expect("LIMIT is always bound") as usize;
        let offset = params[3].as_i64().expect("OFFSET is always bound") as usize;

        let mut rows: Vec<&FixtureBook> = self
            .books
            .iter()
            .filter(|b| author_ids.map_or(true, |ids| ids.contains(&b.author_id)))
            .filter(|b| {
                needle
                    .as_deref()
                    .map_or(true, |n| b.title.to_lowercase().contains(n))
            })
            .collect();

        let (field, direction) = Self::order(sql);
        rows.sort_by(|x, y| {
            let key = |b: &FixtureBook| match field {
                SortField::Title => b.title,
                SortField::AuthorName => b.author_name,
            };
            let primary = key(x).cmp(key(y));
            let primary = match direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            primary.then(x.id.cmp(&y.id))
        });

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|b| {
                RawRow::new()
                    .with("id", SqlValue::Int(b.id))
                    .with("title", SqlValue::String(b.title.to_string()))
                    .with("author_name", SqlValue::String(b.author_name.to_string()))
            })
            .collect())
    }
}

/// Never answers.
pub struct HangingStore;

#[async_trait]
impl Store for HangingStore {
    async fn execute(
        &self,
        _sql: &str,
        _params: &[SqlParam],
        _timeout: Duration,
    ) -> Result<Vec<RawRow>, StoreError> {
        std::future::pending().await
    }
}

/// Fails every call as if the connection dropped.
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn execute(
        &self,
        _sql: &str,
        _params: &[SqlParam],
        _timeout: Duration,
    ) -> Result<Vec<RawRow>, StoreError> {
        Err(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
        .into())
    }
}

/// Returns the one row it was built with, whatever shape it has.
pub struct MalformedStore(pub RawRow);

#[async_trait]
impl Store for MalformedStore {
    async fn execute(
        &self,
        _sql: &str,
        _params: &[SqlParam],
        _timeout: Duration,
    ) -> Result<Vec<RawRow>, StoreError> {
        Ok(vec![self.0.clone()])
    }
}

/// Five books by three authors.
pub fn library() -> Vec<FixtureBook> {
    vec![
        book(1, "The Lion King", 1, "Irene Mecchi"),
        book(2, "KINGDOM", 2, "Zed Author"),
        book(3, "Banana", 3, "Amy Author"),
        book(4, "Apple", 2, "Zed Author"),
        book(5, "Cherry", 1, "Irene Mecchi"),
    ]
}
