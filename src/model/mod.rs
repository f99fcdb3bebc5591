//! State and message types shared across the sync core.
//!
//! This module contains the controller's visible collection state, the typed
//! query parameters used for cache keying, and the realtime change events
//! delivered by a push channel.

pub mod event;
pub mod query;
pub mod state;

pub use event::RealtimeEvent;
pub use query::{OrderBy, Pagination, Query, SortDirection};
pub use state::{CollectionSnapshot, CollectionState, Slot};
