//! Grocery list items: resource wiring and purchase progress counts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use entity::grocery_item::{GroceryItem, GroceryItemDraft, GroceryItemPatch};

use crate::controller::config::{ControllerConfig, InsertPosition};
use crate::resource::Resource;

/// Marker type wiring grocery items into the controller.
pub struct GroceryItems;

/// Filters for grocery list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroceryItemFilters {
    /// Only purchased (`Some(true)`) or only open (`Some(false)`) items.
    pub purchased: Option<bool>,
}

impl Resource for GroceryItems {
    type Entity = GroceryItem;
    type Draft = GroceryItemDraft;
    type Patch = GroceryItemPatch;
    type Filters = GroceryItemFilters;

    const NAME: &'static str = "grocery_items";

    fn id(entity: &GroceryItem) -> &str {
        &entity.id
    }

    fn from_draft(draft: &GroceryItemDraft, id: String, now: DateTime<Utc>) -> GroceryItem {
        GroceryItem {
            id,
            name: draft.name.clone(),
            quantity: draft.quantity,
            unit: draft.unit.clone(),
            purchased: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(entity: &mut GroceryItem, patch: &GroceryItemPatch) {
        if let Some(name) = &patch.name {
            entity.name = name.clone();
        }
        if let Some(quantity) = patch.quantity {
            entity.quantity = quantity;
        }
        if let Some(unit) = &patch.unit {
            entity.unit = Some(unit.clone());
        }
        if let Some(purchased) = patch.purchased {
            // completed_at stays server-managed; the authoritative value
            // arrives with the update response.
            entity.purchased = purchased;
        }
    }

    fn config() -> ControllerConfig {
        // The list is shared and edited at the store, so cached copies age
        // out fast. New items go to the bottom, as on the shopping screen.
        ControllerConfig::new(2 * 60).with_insert_position(InsertPosition::Back)
    }
}

/// Purchase progress derived from the loaded list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroceryStats {
    pub total: usize,
    pub purchased: usize,
}

impl GroceryStats {
    /// Progress over a loaded list.
    pub fn from_items(items: &[GroceryItem]) -> Self {
        Self {
            total: items.len(),
            purchased: items.iter().filter(|item| item.purchased).count(),
        }
    }

    /// Items still to pick up.
    pub fn remaining(&self) -> usize {
        self.total - self.purchased
    }
}
