//! Remote collection controller.
//!
//! A [`CollectionController`] maintains a locally-coherent view of one
//! server-side resource collection under concurrent reads, writes, and push
//! notifications. Reads go through a time-boxed query cache, writes apply
//! optimistically and reconcile against the server response, and realtime
//! events merge into the live sequence by id.
//!
//! The controller owns its state exclusively: instances never share cache or
//! sequence, and two controllers for the same resource fetch and subscribe
//! independently. All operations are non-blocking; locks are released across
//! every remote call so realtime events interleave with in-flight mutations.

pub mod config;

pub use config::{ControllerConfig, InsertPosition};

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::cache::{canonical_key, QueryCache};
use crate::error::Error;
use crate::model::event::RealtimeEvent;
use crate::model::query::Query;
use crate::model::state::{CollectionSnapshot, CollectionState};
use crate::realtime::{RealtimeSource, Subscription};
use crate::resource::Resource;
use crate::service::RemoteDataService;

/// Controller for one resource collection.
///
/// Cheap to clone; clones share the same state through an inner reference.
/// Call [`Self::dispose`] to release the
/// realtime subscription when the owning view goes away.
pub struct CollectionController<R: Resource> {
    inner: Arc<ControllerRef<R>>,
}

impl<R: Resource> Clone for CollectionController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Internal controller reference with configuration and runtime state.
struct ControllerRef<R: Resource> {
    config: ControllerConfig,
    service: Arc<dyn RemoteDataService<R>>,
    state: RwLock<CollectionState<R::Entity>>,
    cache: Mutex<QueryCache<R::Entity>>,
    active_query: Mutex<Option<Query<R::Filters>>>,
    subscription: Mutex<Option<Subscription>>,
    pump: Mutex<Option<JoinHandle<()>>>,
    shutdown: Notify,
}

impl<R: Resource> CollectionController<R> {
    /// Controller with the resource's standard configuration.
    ///
    /// # Arguments
    /// - `service` - Remote data service performing the actual storage calls
    pub fn new(service: Arc<dyn RemoteDataService<R>>) -> Self {
        Self::with_config(service, R::config())
    }

    /// Controller with an explicit configuration (tests shrink the TTL this
    /// way; views use [`Self::new`]).
    pub fn with_config(service: Arc<dyn RemoteDataService<R>>, config: ControllerConfig) -> Self {
        let cache = QueryCache::new(config.ttl());
        Self {
            inner: Arc::new(ControllerRef {
                config,
                service,
                state: RwLock::new(CollectionState::new()),
                cache: Mutex::new(cache),
                active_query: Mutex::new(None),
                subscription: Mutex::new(None),
                pump: Mutex::new(None),
                shutdown: Notify::new(),
            }),
        }
    }

    /// The controller's configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Current view of the collection.
    ///
    /// The snapshot's `stale` flag reports whether a cached `load` for the
    /// active query would still hit; after mutations or realtime events it
    /// turns true until the next fetch.
    pub async fn snapshot(&self) -> CollectionSnapshot<R::Entity> {
        let stale = self.active_entry_is_stale().await;
        let state = self.inner.state.read().await;
        state.snapshot(stale)
    }

    /// Load the collection for `query`.
    ///
    /// With `use_cache` and a fresh cache entry for the serialized query
    /// parameters, the entry is served without a remote call and the loading
    /// flag never flips. Otherwise the remote service is fetched, the result
    /// cached under the canonical parameter key, and the visible sequence,
    /// count, and sync timestamp replaced wholesale.
    ///
    /// On fetch failure the previous sequence and count are left untouched,
    /// the error value is set, and the returned snapshot carries empty items.
    pub async fn load(
        &self,
        query: Query<R::Filters>,
        use_cache: bool,
    ) -> CollectionSnapshot<R::Entity> {
        *self.inner.active_query.lock().await = Some(query.clone());

        let key = match canonical_key(&query) {
            Ok(key) => key,
            Err(err) => {
                tracing::error!(resource = R::NAME, error = %err, "query failed to serialize");
                let mut state = self.inner.state.write().await;
                state.error = Some(err.to_string());
                let mut snapshot = state.snapshot(true);
                snapshot.items = Vec::new();
                snapshot.total_count = 0;
                return snapshot;
            }
        };

        if use_cache {
            let cache = self.inner.cache.lock().await;
            if let Some(entry) = cache.get_fresh(&key, Instant::now()) {
                tracing::debug!(resource = R::NAME, "cache hit, serving stored result");
                let items = entry.items.clone();
                let total_count = entry.total_count;
                drop(cache);

                let mut state = self.inner.state.write().await;
                state.replace_committed(items, total_count);
                state.error = None;
                return state.snapshot(false);
            }
            tracing::debug!(resource = R::NAME, "cache miss, fetching");
        }

        self.inner.state.write().await.loading = true;

        match self.inner.service.fetch_list(&query).await {
            Ok(page) => {
                self.inner.cache.lock().await.insert(
                    key,
                    page.items.clone(),
                    page.total_count,
                    Instant::now(),
                );

                let mut state = self.inner.state.write().await;
                state.loading = false;
                state.error = None;
                state.replace_committed(page.items, page.total_count);
                state.synced_at = Some(Utc::now());
                state.snapshot(false)
            }
            Err(err) => {
                tracing::warn!(resource = R::NAME, error = %err, "list fetch failed");
                let mut state = self.inner.state.write().await;
                state.loading = false;
                state.error = Some(err.to_string());
                // Previous sequence and count stay in place; the caller gets
                // an empty result rather than a partial overwrite.
                let mut snapshot = state.snapshot(true);
                snapshot.items = Vec::new();
                snapshot.total_count = 0;
                snapshot
            }
        }
    }

    /// Create a record optimistically.
    ///
    /// A provisional entity with a `temp-` prefixed id is visible in the
    /// sequence for the whole round trip. On success the temporary slot is
    /// replaced by the authoritative server entity (or dropped, if the
    /// realtime echo already delivered it) and all cache entries are
    /// invalidated. On failure the temporary entry is removed and the
    /// sequence is exactly as before the call.
    pub async fn create(&self, draft: R::Draft) -> Result<R::Entity, Error> {
        let temp_id = format!("{}{}", self.inner.config.temp_id_prefix, Uuid::new_v4());
        let provisional = R::from_draft(&draft, temp_id.clone(), Utc::now());

        {
            let mut state = self.inner.state.write().await;
            state.insert_pending_create(
                temp_id.clone(),
                provisional,
                self.inner.config.insert_position,
            );
        }

        match self.inner.service.create_one(&draft).await {
            Ok(entity) => {
                {
                    let mut state = self.inner.state.write().await;
                    state.resolve_pending_create(&temp_id, entity.clone(), R::id);
                }
                self.invalidate_cache().await;
                Ok(entity)
            }
            Err(err) => {
                tracing::warn!(
                    resource = R::NAME,
                    error = %err,
                    "create failed, rolling back optimistic insert"
                );
                let mut state = self.inner.state.write().await;
                state.remove_pending_create(&temp_id);
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Update the record at `id` optimistically.
    ///
    /// The patch is applied in place immediately; on success the server's
    /// authoritative entity (including server-computed fields) overwrites it
    /// and caches are invalidated; on failure the pre-patch snapshot is
    /// restored exactly.
    ///
    /// When `id` is not in the local sequence the remote call is still
    /// issued but nothing can be rolled back locally. Concurrent updates to
    /// the same id carry no version check: the last response to arrive wins.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<R::Entity, Error> {
        let had_local = {
            let mut state = self.inner.state.write().await;
            state.begin_pending_update(id, R::id, |entity| R::apply_patch(entity, &patch))
        };
        if !had_local {
            tracing::debug!(resource = R::NAME, id, "update target absent locally");
        }

        match self.inner.service.update_one(id, &patch).await {
            Ok(entity) => {
                {
                    let mut state = self.inner.state.write().await;
                    state.commit_update(id, entity.clone(), R::id);
                }
                self.invalidate_cache().await;
                Ok(entity)
            }
            Err(err) => {
                tracing::warn!(
                    resource = R::NAME,
                    id,
                    error = %err,
                    "update failed, restoring snapshot"
                );
                let mut state = self.inner.state.write().await;
                if had_local {
                    state.rollback_update(id, R::id);
                }
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Delete the record at `id` optimistically.
    ///
    /// The whole sequence is snapshotted before the optimistic removal; on
    /// failure the full sequence (ordering included) is restored, not just
    /// the one entity. On success caches are invalidated.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let (prior_slots, prior_count) = {
            let mut state = self.inner.state.write().await;
            let snapshot = state.sequence_snapshot();
            state.remove_by_id(id, R::id);
            snapshot
        };

        match self.inner.service.delete_one(id).await {
            Ok(()) => {
                self.invalidate_cache().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    resource = R::NAME,
                    id,
                    error = %err,
                    "delete failed, restoring sequence"
                );
                let mut state = self.inner.state.write().await;
                state.restore_sequence(prior_slots, prior_count);
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Drop every cache entry and reload the active query from the server.
    ///
    /// Always issues a remote fetch and always replaces the visible state,
    /// even when nothing changed. Falls back to the default query when
    /// nothing has been loaded yet.
    pub async fn refresh(&self) -> CollectionSnapshot<R::Entity> {
        self.invalidate_cache().await;
        let query = self
            .inner
            .active_query
            .lock()
            .await
            .clone()
            .unwrap_or_default();
        self.load(query, false).await
    }

    /// Merge an external change notification into the live sequence.
    ///
    /// Inserts are ignored when the id is already visible, including as a
    /// pending temporary id; this suppresses the network echo of our own
    /// optimistic create. Updates replace the matching entity in place and
    /// are ignored for unknown ids. Deletes remove the matching entity or
    /// no-op. Every event invalidates the cache without triggering a
    /// re-fetch: the live sequence is the source of truth until the next
    /// explicit load.
    pub async fn apply_realtime_event(&self, event: RealtimeEvent<R::Entity>) {
        {
            let mut state = self.inner.state.write().await;
            match event {
                RealtimeEvent::Insert(entity) => {
                    let id = R::id(&entity).to_string();
                    if state.contains_id(&id, R::id) {
                        tracing::debug!(resource = R::NAME, id, "ignoring duplicate insert");
                    } else {
                        state.insert_committed(entity, self.inner.config.insert_position);
                    }
                }
                RealtimeEvent::Update(entity) => {
                    let id = R::id(&entity).to_string();
                    if !state.merge_update(entity, R::id) {
                        tracing::debug!(resource = R::NAME, id, "ignoring update for unknown id");
                    }
                }
                RealtimeEvent::Delete(id) => {
                    state.remove_by_id(&id, R::id);
                }
            }
        }
        self.invalidate_cache().await;
    }

    /// Subscribe to a realtime source and pump its events into
    /// [`Self::apply_realtime_event`] until [`Self::dispose`] is called or
    /// the source closes the channel.
    ///
    /// Attaching while already attached logs a warning and leaves the
    /// existing subscription alone.
    pub async fn attach(&self, source: &dyn RealtimeSource<R::Entity>) -> Result<(), Error> {
        let mut slot = self.inner.subscription.lock().await;
        if slot.is_some() {
            tracing::warn!(resource = R::NAME, "controller is already attached");
            return Ok(());
        }

        let (subscription, mut receiver) = source.subscribe(R::NAME).await?;
        *slot = Some(subscription);
        drop(slot);

        let controller = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;

                    _ = controller.inner.shutdown.notified() => break,

                    event = receiver.recv() => match event {
                        Some(event) => {
                            tracing::debug!(
                                resource = R::NAME,
                                kind = event.kind(),
                                "applying realtime event"
                            );
                            controller.apply_realtime_event(event).await;
                        }
                        None => break,
                    },
                }
            }
            tracing::debug!(resource = R::NAME, "realtime pump stopped");
        });
        *self.inner.pump.lock().await = Some(handle);

        tracing::info!(resource = R::NAME, "realtime subscription attached");
        Ok(())
    }

    /// Release the realtime subscription and stop the event pump.
    ///
    /// Safe to call repeatedly and without a prior [`Self::attach`]. The
    /// collection state stays readable afterwards.
    pub async fn dispose(&self) {
        self.inner.shutdown.notify_one();

        if let Some(subscription) = self.inner.subscription.lock().await.take() {
            subscription.unsubscribe();
        }

        if let Some(handle) = self.inner.pump.lock().await.take() {
            if handle.await.is_err() {
                tracing::warn!(resource = R::NAME, "realtime pump ended abnormally");
            }
            tracing::info!(resource = R::NAME, "controller disposed");
        }
    }

    async fn invalidate_cache(&self) {
        self.inner.cache.lock().await.invalidate_all();
    }

    /// Whether a cached load for the active query would miss right now.
    async fn active_entry_is_stale(&self) -> bool {
        let query = self.inner.active_query.lock().await.clone();
        let Some(query) = query else {
            return true;
        };
        let Ok(key) = canonical_key(&query) else {
            return true;
        };
        !self.inner.cache.lock().await.is_fresh(&key, Instant::now())
    }
}
