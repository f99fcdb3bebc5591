//! Recipes: resource wiring and search helpers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use entity::recipe::{Recipe, RecipeDraft, RecipePatch};

use crate::controller::config::{ControllerConfig, InsertPosition};
use crate::resource::Resource;

/// Marker type wiring recipes into the controller.
pub struct Recipes;

/// Filters for recipe list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeFilters {
    /// Case-insensitive name search term.
    pub search: Option<String>,
    /// Restrict to recipes carrying this tag.
    pub tag: Option<String>,
}

impl Resource for Recipes {
    type Entity = Recipe;
    type Draft = RecipeDraft;
    type Patch = RecipePatch;
    type Filters = RecipeFilters;

    const NAME: &'static str = "recipes";

    fn id(entity: &Recipe) -> &str {
        &entity.id
    }

    fn from_draft(draft: &RecipeDraft, id: String, now: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            name: draft.name.clone(),
            tags: draft.tags.clone(),
            servings: draft.servings,
            link: draft.link.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(entity: &mut Recipe, patch: &RecipePatch) {
        if let Some(name) = &patch.name {
            entity.name = name.clone();
        }
        if let Some(tags) = &patch.tags {
            entity.tags = tags.clone();
        }
        if let Some(servings) = patch.servings {
            entity.servings = servings;
        }
        if let Some(link) = &patch.link {
            entity.link = Some(link.clone());
        }
    }

    fn config() -> ControllerConfig {
        ControllerConfig::new(10 * 60).with_insert_position(InsertPosition::Front)
    }
}

/// Recipes whose name contains `term`, case-insensitively.
pub fn search<'a>(items: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|recipe| recipe.name.to_lowercase().contains(&term))
        .collect()
}

/// Recipes carrying `tag` exactly.
pub fn with_tag<'a>(items: &'a [Recipe], tag: &str) -> Vec<&'a Recipe> {
    items
        .iter()
        .filter(|recipe| recipe.tags.iter().any(|t| t == tag))
        .collect()
}
