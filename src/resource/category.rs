//! Transaction categories: resource wiring and kind grouping.

use chrono::{DateTime, Utc};
use serde::Serialize;

use entity::category::{Category, CategoryDraft, CategoryKind, CategoryPatch};

use crate::controller::config::{ControllerConfig, InsertPosition};
use crate::resource::Resource;

/// Marker type wiring categories into the controller.
pub struct Categories;

/// Filters for category list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryFilters {
    pub kind: Option<CategoryKind>,
}

impl Resource for Categories {
    type Entity = Category;
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;
    type Filters = CategoryFilters;

    const NAME: &'static str = "categories";

    fn id(entity: &Category) -> &str {
        &entity.id
    }

    fn from_draft(draft: &CategoryDraft, id: String, now: DateTime<Utc>) -> Category {
        Category {
            id,
            name: draft.name.clone(),
            kind: draft.kind,
            color: draft.color.clone(),
            sort_order: draft.sort_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(entity: &mut Category, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            entity.name = name.clone();
        }
        if let Some(color) = &patch.color {
            entity.color = Some(color.clone());
        }
        if let Some(sort_order) = patch.sort_order {
            entity.sort_order = sort_order;
        }
    }

    fn config() -> ControllerConfig {
        // Categories barely change; cached copies stay valid the longest.
        ControllerConfig::new(30 * 60).with_insert_position(InsertPosition::Back)
    }
}

/// Categories of one kind, ordered by their sort position.
pub fn of_kind(items: &[Category], kind: CategoryKind) -> Vec<&Category> {
    let mut categories: Vec<&Category> =
        items.iter().filter(|category| category.kind == kind).collect();
    categories.sort_by_key(|category| category.sort_order);
    categories
}
