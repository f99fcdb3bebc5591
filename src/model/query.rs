//! Typed query parameters for list fetches.
//!
//! Every distinct combination of filters, pagination, and ordering gets its
//! own cache entry, so all of these types serialize deterministically: the
//! cache key is derived from the serde representation (see
//! [`crate::cache::canonical_key`]).

use serde::Serialize;

/// Sort direction for an ordered list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Column and direction a list fetch is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    /// Server-side column name to order by.
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    /// Order by `column`, ascending.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Order by `column`, descending.
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Offset/limit window for a paginated list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    /// First `limit` records.
    pub fn first(limit: u64) -> Self {
        Self { offset: 0, limit }
    }
}

/// Full description of a list fetch: resource-specific filters plus optional
/// pagination and ordering.
///
/// `F` is the per-resource filter struct (see the `resource` module). The
/// default query is the unfiltered, unpaginated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query<F> {
    pub filters: F,
    pub pagination: Option<Pagination>,
    pub order_by: Option<OrderBy>,
}

impl<F> Query<F> {
    /// Query with the given filters and no pagination or ordering.
    pub fn new(filters: F) -> Self {
        Self {
            filters,
            pagination: None,
            order_by: None,
        }
    }

    /// Restrict the query to a pagination window.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Order the query by a column.
    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

impl<F: Default> Default for Query<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}
