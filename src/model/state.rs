//! Visible collection state and its slot representation.
//!
//! The controller owns one [`CollectionState`] per resource collection. Each
//! position in the sequence is a [`Slot`]: either a server-acknowledged
//! record or an optimistic entry awaiting reconciliation. Keeping the
//! pending/committed distinction in the slot makes rollback and
//! reconciliation structural operations instead of id-string splices.

use chrono::{DateTime, Utc};

use crate::controller::config::InsertPosition;

/// One position in the visible sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<E> {
    /// A record the server has acknowledged.
    Committed(E),
    /// An optimistic insert awaiting server acknowledgement. The entity
    /// carries a provisional `temp-` prefixed id.
    PendingCreate {
        /// Controller-issued temporary id, also present on the entity.
        temp_id: String,
        /// Provisional record synthesized from the draft.
        entity: E,
    },
    /// An optimistically patched record awaiting server acknowledgement.
    PendingUpdate {
        /// The patched record currently shown to readers.
        entity: E,
        /// Snapshot taken before the patch, restored on failure.
        prior: Box<E>,
    },
}

impl<E> Slot<E> {
    /// The record readers see for this slot, regardless of pending status.
    pub fn entity(&self) -> &E {
        match self {
            Self::Committed(entity) => entity,
            Self::PendingCreate { entity, .. } => entity,
            Self::PendingUpdate { entity, .. } => entity,
        }
    }

    /// Whether this slot holds optimistic state awaiting reconciliation.
    pub fn is_pending(&self) -> bool {
        !matches!(self, Self::Committed(_))
    }
}

/// Point-in-time view of a collection handed to the view layer.
///
/// Snapshots are cheap copies decoupled from the controller's locks; the
/// view layer reads fields directly and never mutates through them.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot<E> {
    /// The visible sequence, optimistic entries included.
    pub items: Vec<E>,
    /// Server-reported total, which may exceed `items.len()` when paginated.
    pub total_count: u64,
    /// True only while a live fetch is in flight (never for cache hits).
    pub loading: bool,
    /// Human-readable message from the most recent failure, if any.
    pub error: Option<String>,
    /// When the sequence last reflected a server response.
    pub synced_at: Option<DateTime<Utc>>,
    /// True when the next cached load for the active query would miss, i.e.
    /// a fresh fetch is needed to be sure the data is current.
    pub stale: bool,
}

/// The controller-owned state of one resource collection.
#[derive(Debug, Clone)]
pub struct CollectionState<E> {
    slots: Vec<Slot<E>>,
    /// Server-reported total for the active query.
    pub total_count: u64,
    /// True only for the duration of a live fetch.
    pub loading: bool,
    /// Most recent failure message; cleared by the next successful load.
    pub error: Option<String>,
    /// When the sequence last reflected a server response.
    pub synced_at: Option<DateTime<Utc>>,
}

impl<E: Clone> CollectionState<E> {
    /// Empty state, as created when a controller is instantiated.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            total_count: 0,
            loading: false,
            error: None,
            synced_at: None,
        }
    }

    /// Number of visible entries, optimistic ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the visible sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the visible records in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.slots.iter().map(Slot::entity)
    }

    /// Whether any entry (committed id, pending entity id, or pending
    /// temporary id) matches `id`.
    pub fn contains_id(&self, id: &str, id_of: impl Fn(&E) -> &str) -> bool {
        self.slots.iter().any(|slot| {
            if let Slot::PendingCreate { temp_id, .. } = slot {
                if temp_id == id {
                    return true;
                }
            }
            id_of(slot.entity()) == id
        })
    }

    /// Copy out the current sequence and count for a full-sequence rollback.
    pub fn sequence_snapshot(&self) -> (Vec<Slot<E>>, u64) {
        (self.slots.clone(), self.total_count)
    }

    /// Restore a sequence snapshot taken by [`Self::sequence_snapshot`].
    pub fn restore_sequence(&mut self, slots: Vec<Slot<E>>, total_count: u64) {
        self.slots = slots;
        self.total_count = total_count;
    }

    /// Replace the whole sequence with server results. Drops any optimistic
    /// entries: a load is a wholesale replacement of the visible state.
    pub fn replace_committed(&mut self, items: Vec<E>, total_count: u64) {
        self.slots = items.into_iter().map(Slot::Committed).collect();
        self.total_count = total_count;
    }

    /// Insert an optimistic create at the configured position.
    pub fn insert_pending_create(&mut self, temp_id: String, entity: E, position: InsertPosition) {
        let slot = Slot::PendingCreate { temp_id, entity };
        match position {
            InsertPosition::Front => self.slots.insert(0, slot),
            InsertPosition::Back => self.slots.push(slot),
        }
        self.total_count += 1;
    }

    /// Insert a committed record (realtime insert) at the configured position.
    pub fn insert_committed(&mut self, entity: E, position: InsertPosition) {
        match position {
            InsertPosition::Front => self.slots.insert(0, Slot::Committed(entity)),
            InsertPosition::Back => self.slots.push(Slot::Committed(entity)),
        }
        self.total_count += 1;
    }

    /// Replace the pending-create slot for `temp_id` with the authoritative
    /// server record. If the server id already landed in another slot (the
    /// realtime echo beat the response), the temporary slot is dropped
    /// instead, so the sequence never holds two entries with one id.
    ///
    /// Returns false when no slot with `temp_id` remains.
    pub fn resolve_pending_create(
        &mut self,
        temp_id: &str,
        entity: E,
        id_of: impl Fn(&E) -> &str,
    ) -> bool {
        let Some(index) = self.slots.iter().position(
            |slot| matches!(slot, Slot::PendingCreate { temp_id: t, .. } if t == temp_id),
        ) else {
            return false;
        };

        let server_id = id_of(&entity).to_string();
        let duplicate = self
            .slots
            .iter()
            .enumerate()
            .any(|(i, slot)| i != index && id_of(slot.entity()) == server_id);

        if duplicate {
            self.slots.remove(index);
            self.total_count = self.total_count.saturating_sub(1);
        } else {
            self.slots[index] = Slot::Committed(entity);
        }
        true
    }

    /// Remove the pending-create slot for `temp_id` (create rollback).
    pub fn remove_pending_create(&mut self, temp_id: &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(
            |slot| !matches!(slot, Slot::PendingCreate { temp_id: t, .. } if t == temp_id),
        );
        let removed = self.slots.len() < before;
        if removed {
            self.total_count = self.total_count.saturating_sub(1);
        }
        removed
    }

    /// Snapshot the record at `id` and apply `patch` optimistically in place.
    ///
    /// Returns false when `id` is not in the sequence; in that case nothing
    /// changes locally and there is nothing to roll back.
    pub fn begin_pending_update(
        &mut self,
        id: &str,
        id_of: impl Fn(&E) -> &str,
        apply: impl FnOnce(&mut E),
    ) -> bool {
        let Some(index) = self
            .slots
            .iter()
            .position(|slot| id_of(slot.entity()) == id)
        else {
            return false;
        };

        let prior = self.slots[index].entity().clone();
        let mut patched = prior.clone();
        apply(&mut patched);
        self.slots[index] = Slot::PendingUpdate {
            entity: patched,
            prior: Box::new(prior),
        };
        true
    }

    /// Overwrite the record at `id` with the authoritative server response.
    /// Ignored when `id` is no longer in the sequence.
    pub fn commit_update(&mut self, id: &str, entity: E, id_of: impl Fn(&E) -> &str) {
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| id_of(slot.entity()) == id)
        {
            *slot = Slot::Committed(entity);
        }
    }

    /// Restore the pre-patch snapshot for `id` (update rollback). A slot
    /// that is no longer a pending update is left alone: a realtime event
    /// replaced it in the meantime and the last write wins.
    pub fn rollback_update(&mut self, id: &str, id_of: impl Fn(&E) -> &str) {
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| id_of(slot.entity()) == id)
        {
            if let Slot::PendingUpdate { prior, .. } = slot {
                *slot = Slot::Committed((**prior).clone());
            }
        }
    }

    /// Replace the record with matching id in place (realtime update).
    /// Returns false (and changes nothing) when no match exists.
    pub fn merge_update(&mut self, entity: E, id_of: impl Fn(&E) -> &str) -> bool {
        let id = id_of(&entity).to_string();
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| id_of(slot.entity()) == id)
        {
            *slot = Slot::Committed(entity);
            true
        } else {
            false
        }
    }

    /// Remove the record with matching id. Returns false on no match.
    pub fn remove_by_id(&mut self, id: &str, id_of: impl Fn(&E) -> &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| id_of(slot.entity()) != id);
        let removed = self.slots.len() < before;
        if removed {
            self.total_count = self.total_count.saturating_sub(1);
        }
        removed
    }

    /// Copy the state into a snapshot for the view layer.
    pub fn snapshot(&self, stale: bool) -> CollectionSnapshot<E> {
        CollectionSnapshot {
            items: self.iter().cloned().collect(),
            total_count: self.total_count,
            loading: self.loading,
            error: self.error.clone(),
            synced_at: self.synced_at,
            stale,
        }
    }
}

impl<E: Clone> Default for CollectionState<E> {
    fn default() -> Self {
        Self::new()
    }
}
