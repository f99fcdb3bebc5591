//! Scriptable in-memory remote data service.
//!
//! `MockRemoteService` stands in for the storage backend during tests. It
//! keeps its records in memory, hands out `srv-` prefixed ids on create, and
//! can be scripted to fail the next call of each kind so rollback paths can
//! be exercised deterministically.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use gamjatokki::error::ServiceError;
use gamjatokki::model::query::Query;
use gamjatokki::resource::Resource;
use gamjatokki::service::{ListPage, RemoteDataService};

/// In-memory remote service for one resource.
///
/// Seed it with records, script failures with the `fail_next_*` methods,
/// and assert on the call counters after the controller has run.
pub struct MockRemoteService<R: Resource> {
    records: Mutex<Vec<R::Entity>>,
    total_count: Mutex<Option<u64>>,
    next_id: AtomicU64,
    last_created_id: Mutex<Option<String>>,

    fail_fetch: Mutex<Option<ServiceError>>,
    fail_create: Mutex<Option<ServiceError>>,
    fail_update: Mutex<Option<ServiceError>>,
    fail_delete: Mutex<Option<ServiceError>>,

    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl<R: Resource> MockRemoteService<R> {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a service seeded with `records`.
    ///
    /// # Arguments
    /// - `records` - Entities returned by `fetch_list` and targeted by
    ///   `update_one` / `delete_one`
    pub fn with_records(records: Vec<R::Entity>) -> Self {
        Self {
            records: Mutex::new(records),
            total_count: Mutex::new(None),
            next_id: AtomicU64::new(1),
            last_created_id: Mutex::new(None),
            fail_fetch: Mutex::new(None),
            fail_create: Mutex::new(None),
            fail_update: Mutex::new(None),
            fail_delete: Mutex::new(None),
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Report `total_count` instead of the record count, as a paginated
    /// backend would.
    pub fn set_total_count(&self, total_count: u64) {
        *self.total_count.lock().unwrap() = Some(total_count);
    }

    /// Fail the next `fetch_list` call with an unavailable error.
    pub fn fail_next_fetch(&self, message: &str) {
        *self.fail_fetch.lock().unwrap() = Some(ServiceError::Unavailable(message.to_string()));
    }

    /// Fail the next `create_one` call with a rejection.
    pub fn fail_next_create(&self, message: &str) {
        *self.fail_create.lock().unwrap() = Some(ServiceError::Rejected(message.to_string()));
    }

    /// Fail the next `update_one` call with a rejection.
    pub fn fail_next_update(&self, message: &str) {
        *self.fail_update.lock().unwrap() = Some(ServiceError::Rejected(message.to_string()));
    }

    /// Fail the next `delete_one` call with a rejection.
    pub fn fail_next_delete(&self, message: &str) {
        *self.fail_delete.lock().unwrap() = Some(ServiceError::Rejected(message.to_string()));
    }

    /// Number of `fetch_list` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `create_one` calls so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_one` calls so far.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Number of `delete_one` calls so far.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Id assigned by the most recent successful `create_one`.
    pub fn last_created_id(&self) -> Option<String> {
        self.last_created_id.lock().unwrap().clone()
    }

    /// Current server-side records.
    pub fn records(&self) -> Vec<R::Entity> {
        self.records.lock().unwrap().clone()
    }

    /// Replace the server-side records, leaving counters untouched.
    pub fn replace_records(&self, records: Vec<R::Entity>) {
        *self.records.lock().unwrap() = records;
    }

    fn effective_total(&self, record_count: usize) -> u64 {
        self.total_count
            .lock()
            .unwrap()
            .unwrap_or(record_count as u64)
    }
}

impl<R: Resource> Default for MockRemoteService<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Resource> RemoteDataService<R> for MockRemoteService<R> {
    async fn fetch_list(
        &self,
        _query: &Query<R::Filters>,
    ) -> Result<ListPage<R::Entity>, ServiceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_fetch.lock().unwrap().take() {
            return Err(err);
        }
        let records = self.records.lock().unwrap();
        Ok(ListPage {
            items: records.clone(),
            total_count: self.effective_total(records.len()),
        })
    }

    async fn create_one(&self, draft: &R::Draft) -> Result<R::Entity, ServiceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_create.lock().unwrap().take() {
            return Err(err);
        }
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let entity = R::from_draft(draft, id.clone(), Utc::now());
        self.records.lock().unwrap().push(entity.clone());
        *self.last_created_id.lock().unwrap() = Some(id);
        Ok(entity)
    }

    async fn update_one(&self, id: &str, patch: &R::Patch) -> Result<R::Entity, ServiceError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_update.lock().unwrap().take() {
            return Err(err);
        }
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|entity| R::id(entity) == id) {
            Some(entity) => {
                R::apply_patch(entity, patch);
                Ok(entity.clone())
            }
            None => Err(ServiceError::NotFound {
                resource: R::NAME,
                id: id.to_string(),
            }),
        }
    }

    async fn delete_one(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_delete.lock().unwrap().take() {
            return Err(err);
        }
        self.records
            .lock()
            .unwrap()
            .retain(|entity| R::id(entity) != id);
        Ok(())
    }
}
