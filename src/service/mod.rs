//! Remote data service boundary.
//!
//! The controller performs all persistent reads and writes through
//! [`RemoteDataService`]. Implementations live outside the core (the
//! production one wraps the Supabase REST layer); tests use the scripted
//! in-memory service from the test-utils crate.
//!
//! The controller never retries: a failure is surfaced once and any
//! optimistic state is rolled back synchronously.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::query::Query;
use crate::resource::Resource;

/// One page of a filtered list fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<E> {
    /// Records in server-determined order.
    pub items: Vec<E>,
    /// Total matching records, which may exceed `items.len()` when the
    /// query was paginated.
    pub total_count: u64,
}

/// Persistent storage operations for one resource collection.
///
/// All failures must be reported as a [`ServiceError`]; the controller
/// treats any `Err` as all-or-nothing against the single entity involved.
#[async_trait]
pub trait RemoteDataService<R: Resource>: Send + Sync {
    /// Fetch the records matching `query`, with the server-reported total.
    async fn fetch_list(&self, query: &Query<R::Filters>) -> Result<ListPage<R::Entity>, ServiceError>;

    /// Persist a new record and return the authoritative entity, including
    /// the server-issued id and timestamps.
    async fn create_one(&self, draft: &R::Draft) -> Result<R::Entity, ServiceError>;

    /// Apply a partial update to the record at `id` and return the
    /// authoritative entity, including any server-computed fields.
    async fn update_one(&self, id: &str, patch: &R::Patch) -> Result<R::Entity, ServiceError>;

    /// Delete the record at `id`.
    async fn delete_one(&self, id: &str) -> Result<(), ServiceError>;
}
