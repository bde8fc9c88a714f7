use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Page size the API surfaces fall back to when the caller says nothing.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Author as seen in a listing: the name only, captured at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, async_graphql::SimpleObject)]
pub struct Author {
    pub name: String,
}

/// Book with an embedded snapshot of its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, async_graphql::SimpleObject)]
pub struct Book {
    /// Row identifier
    pub id: i64,
    pub title: String,
    pub author: Author,
}

/// Column a listing is ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    async_graphql::Enum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    #[serde(alias = "TITLE")]
    Title,
    #[serde(alias = "AUTHOR_NAME")]
    AuthorName,
}

impl SortField {
    /// The SQL expression this field sorts on.
    pub const fn column(self) -> &'static str {
        match self {
            SortField::Title => "b.title",
            SortField::AuthorName => "a.name",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    async_graphql::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortDirection {
    pub const fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Parameters of one listing call.
///
/// `limit: None` means "use the configured default", never "unlimited".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListingRequest {
    pub author_ids: Option<BTreeSet<i64>>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: i64,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for BookListingRequest {
    fn default() -> Self {
        Self {
            author_ids: None,
            search: None,
            limit: Some(DEFAULT_PAGE_SIZE),
            offset: 0,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}
