//! Remote collection state management for the 감자토끼 household ledger.
//!
//! This crate keeps a locally-coherent view of server-side collections
//! (transactions, grocery items, meal plans, recipes, categories) under
//! concurrent reads, optimistic writes, and realtime push events. The
//! [`controller::CollectionController`] is the entry point; it composes a
//! time-boxed query cache, an optimistic edit sequence, and a realtime
//! event merge over two injected collaborators, the
//! [`service::RemoteDataService`] and the [`realtime::RealtimeSource`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod controller;
pub mod error;
pub mod model;
pub mod realtime;
pub mod resource;
pub mod service;

pub use controller::{CollectionController, ControllerConfig, InsertPosition};
pub use error::Error;
pub use model::event::RealtimeEvent;
pub use model::query::{OrderBy, Pagination, Query, SortDirection};
pub use model::state::CollectionSnapshot;
