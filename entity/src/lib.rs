//! Domain records for the GamjaTokki household ledger.
//!
//! Plain data types shared between the sync core and test utilities. Records
//! carry server-managed timestamps; identifiers are strings so both
//! server-issued and provisional (`temp-` prefixed) ids fit in one field.

pub mod category;
pub mod grocery_item;
pub mod meal_plan;
pub mod recipe;
pub mod transaction;

pub mod prelude {
    pub use crate::category::{Category, CategoryDraft, CategoryKind, CategoryPatch};
    pub use crate::grocery_item::{GroceryItem, GroceryItemDraft, GroceryItemPatch};
    pub use crate::meal_plan::{MealPlan, MealPlanDraft, MealPlanPatch, MealSlot};
    pub use crate::recipe::{Recipe, RecipeDraft, RecipePatch};
    pub use crate::transaction::{
        Transaction, TransactionDraft, TransactionKind, TransactionPatch,
    };
}
