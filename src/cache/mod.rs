//! Time-boxed query result cache.
//!
//! Each controller owns one [`QueryCache`] holding a snapshot of every
//! distinct query-parameter combination it has served since creation. An
//! entry is valid until its resource-specific time-to-live elapses; every
//! successful mutation and every realtime event invalidates the whole cache,
//! since cached sequences no longer reflect the live collection.
//!
//! Staleness is always computed against a caller-supplied `now`, so expiry
//! behavior is testable without sleeping.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::Error;

/// Canonical cache key for a set of query parameters.
///
/// Serializes through `serde_json::Value`, whose object representation keeps
/// keys sorted, so the rendered string is a deterministic function of the
/// parameter values regardless of field declaration order.
///
/// # Arguments
/// - `query` - Any serializable query-parameter struct
///
/// # Returns
/// - `Ok(String)` - Deterministic key for the parameter combination
/// - `Err(Error::CacheKey)` - The parameters failed to serialize
pub fn canonical_key<Q: Serialize>(query: &Q) -> Result<String, Error> {
    let value = serde_json::to_value(query)?;
    Ok(value.to_string())
}

/// A cached copy of one query's result.
#[derive(Debug, Clone)]
pub struct CacheEntry<E> {
    /// The sequence as the server returned it.
    pub items: Vec<E>,
    /// Server-reported total for the query.
    pub total_count: u64,
    /// When the snapshot was captured.
    pub captured_at: Instant,
}

/// Per-controller store of time-boxed query results.
#[derive(Debug)]
pub struct QueryCache<E> {
    ttl: Duration,
    entries: HashMap<String, CacheEntry<E>>,
}

impl<E: Clone> QueryCache<E> {
    /// Empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The entry for `key` if present and not stale at `now`.
    ///
    /// A stale entry is left in place; the next [`Self::insert`] for the key
    /// overwrites it.
    pub fn get_fresh(&self, key: &str, now: Instant) -> Option<&CacheEntry<E>> {
        self.entries
            .get(key)
            .filter(|entry| now.duration_since(entry.captured_at) <= self.ttl)
    }

    /// Whether a fresh entry exists for `key` at `now`.
    pub fn is_fresh(&self, key: &str, now: Instant) -> bool {
        self.get_fresh(key, now).is_some()
    }

    /// Store (or overwrite) the entry for `key`, captured at `now`.
    pub fn insert(&mut self, key: String, items: Vec<E>, total_count: u64, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                items,
                total_count,
                captured_at: now,
            },
        );
    }

    /// Drop every entry. Called after mutations and realtime events.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
