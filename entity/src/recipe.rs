use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub servings: i32,
    /// External link to the recipe source, if any.
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies when saving a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub tags: Vec<String>,
    pub servings: i32,
    pub link: Option<String>,
}

/// Partial update for a recipe. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub servings: Option<i32>,
    pub link: Option<String>,
}
