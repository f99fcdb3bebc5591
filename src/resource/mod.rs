//! Per-resource configuration for the collection controller.
//!
//! Each of the five household-ledger collections wires its entity types,
//! filter struct, cache TTL, and insert position into the shared controller
//! through the [`Resource`] trait, and carries the derived-stats and query
//! helpers its views need. One module per resource.

pub mod category;
pub mod grocery_item;
pub mod meal_plan;
pub mod recipe;
pub mod transaction;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::controller::config::ControllerConfig;

pub use category::Categories;
pub use grocery_item::GroceryItems;
pub use meal_plan::MealPlans;
pub use recipe::Recipes;
pub use transaction::Transactions;

/// Static description of one resource collection.
///
/// Implementations are zero-sized marker types; the controller is generic
/// over them and pulls everything resource-specific from here.
pub trait Resource: Send + Sync + 'static {
    /// The record type as stored in the collection.
    type Entity: Clone + Send + Sync + 'static;
    /// Fields a client supplies when creating a record.
    type Draft: Clone + Send + Sync + 'static;
    /// Partial update applied to an existing record.
    type Patch: Clone + Send + Sync + 'static;
    /// Filter parameters for list queries; must serialize deterministically
    /// for cache keying.
    type Filters: Serialize + Clone + Default + Send + Sync + 'static;

    /// Collection name as the realtime feed and logs know it.
    const NAME: &'static str;

    /// The record's identifier.
    fn id(entity: &Self::Entity) -> &str;

    /// Synthesize a provisional record from a draft for the optimistic
    /// insert. `id` is the controller-issued temporary id; `now` fills the
    /// placeholder timestamps that the server will overwrite.
    fn from_draft(draft: &Self::Draft, id: String, now: DateTime<Utc>) -> Self::Entity;

    /// Apply a patch to a record in place, for the optimistic update.
    fn apply_patch(entity: &mut Self::Entity, patch: &Self::Patch);

    /// Controller configuration (cache TTL, insert position) for this
    /// resource.
    fn config() -> ControllerConfig;
}
