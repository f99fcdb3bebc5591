use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item on the shared grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub unit: Option<String>,
    pub purchased: bool,
    /// Set by the server when the item is marked purchased.
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies when adding an item to the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItemDraft {
    pub name: String,
    pub quantity: i32,
    pub unit: Option<String>,
}

/// Partial update for a grocery item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroceryItemPatch {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub purchased: Option<bool>,
}
