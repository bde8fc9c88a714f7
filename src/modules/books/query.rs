//! Turns a validated [`BookListingRequest`] into a [`QueryPlan`].
//!
//! The statement shape is fixed. Optional filters are written as
//! `(param IS NULL OR predicate)` so absent filters are bound as typed NULLs
//! instead of changing the WHERE clause. The only text that varies per
//! request is the ORDER BY fragment, and that is picked from
//! [`SortField::column`] and [`SortDirection::keyword`], never from input.

use std::time::Duration;

use bookshelf_db::SqlParam;

use super::models::BookListingRequest;
use super::service::ListingOptions;

const SELECT_BOOKS: &str = "SELECT b.id, b.title, a.name AS author_name \
     FROM books b JOIN authors a ON b.author_id = a.id \
     WHERE ($1::bigint[] IS NULL OR b.author_id = ANY($1::bigint[])) \
     AND ($2::text IS NULL OR b.title ILIKE '%' || $2::text || '%' ESCAPE '\\')";

const PAGINATE: &str = "LIMIT $3 OFFSET $4";

/// Ties between equal sort keys are broken by row id.
const TIE_BREAK: &str = "b.id ASC";

/// Resolved statement, positional parameters, and time budget for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    sql: String,
    params: Vec<SqlParam>,
    timeout: Duration,
}

impl QueryPlan {
    pub fn new(sql: String, params: Vec<SqlParam>, timeout: Duration) -> Self {
        Self {
            sql,
            params,
            timeout,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Highest `$n` placeholder in the statement.
    pub fn placeholder_count(&self) -> usize {
        let bytes = self.sql.as_bytes();
        let mut highest = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if let Ok(n) = self.sql[start..end].parse::<usize>() {
                    highest = highest.max(n);
                }
                i = end.max(start);
            } else {
                i += 1;
            }
        }
        highest
    }
}

/// Build the plan for an already validated request.
pub fn build_plan(request: &BookListingRequest, options: &ListingOptions) -> QueryPlan {
    let sql = format!(
        "{SELECT_BOOKS} ORDER BY {} {}, {TIE_BREAK} {PAGINATE}",
        request.sort_field.column(),
        request.sort_direction.keyword(),
    );

    let author_ids = request
        .author_ids
        .as_ref()
        .filter(|ids| !ids.is_empty())
        .map(|ids| ids.iter().copied().collect::<Vec<_>>());

    let search = request
        .search
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| escape_like(&text.to_lowercase()));

    let limit = request.limit.unwrap_or(options.default_limit);

    let params = vec![
        SqlParam::BigIntArray(author_ids),
        SqlParam::Text(search),
        SqlParam::BigInt(Some(limit)),
        SqlParam::BigInt(Some(request.offset)),
    ];

    QueryPlan::new(sql, params, options.timeout)
}

/// Escape LIKE metacharacters so the search text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
