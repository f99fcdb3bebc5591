use chrono::{DateTime, NaiveDate, Utc};
use entity::category::{Category, CategoryDraft, CategoryKind};
use entity::grocery_item::{GroceryItem, GroceryItemDraft};
use entity::meal_plan::{MealPlan, MealPlanDraft, MealSlot};
use entity::recipe::{Recipe, RecipeDraft};
use entity::transaction::{Transaction, TransactionDraft, TransactionKind};

/// Fixed timestamp shared by all factory entities.
fn mock_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-15T09:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Fixed calendar date shared by all factory entities.
pub fn mock_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
}

/// Create a mock transaction with default test values.
///
/// # Arguments
/// - `id` - Record id to use
/// - `kind` - Income or expense
/// - `amount` - Amount in won
///
/// # Returns
/// - `Transaction` - A ledger entry with test data
pub fn mock_transaction(id: &str, kind: TransactionKind, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        amount,
        category_id: Some("cat-food".to_string()),
        memo: Some("점심".to_string()),
        occurred_on: mock_date(),
        created_at: mock_timestamp(),
        updated_at: mock_timestamp(),
    }
}

/// Create a mock transaction draft with default test values.
///
/// # Arguments
/// - `kind` - Income or expense
/// - `amount` - Amount in won
///
/// # Returns
/// - `TransactionDraft` - Draft fields for a new ledger entry
pub fn mock_transaction_draft(kind: TransactionKind, amount: i64) -> TransactionDraft {
    TransactionDraft {
        kind,
        amount,
        category_id: Some("cat-food".to_string()),
        memo: None,
        occurred_on: mock_date(),
    }
}

/// Create a mock grocery item with default test values.
///
/// # Arguments
/// - `id` - Record id to use
/// - `name` - Item name
/// - `purchased` - Whether the item has been picked up
///
/// # Returns
/// - `GroceryItem` - A grocery list entry with test data
pub fn mock_grocery_item(id: &str, name: &str, purchased: bool) -> GroceryItem {
    GroceryItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity: 1,
        unit: None,
        purchased,
        completed_at: purchased.then(mock_timestamp),
        created_at: mock_timestamp(),
        updated_at: mock_timestamp(),
    }
}

/// Create a mock grocery item draft with default test values.
///
/// # Arguments
/// - `name` - Item name
///
/// # Returns
/// - `GroceryItemDraft` - Draft fields for a new grocery list entry
pub fn mock_grocery_item_draft(name: &str) -> GroceryItemDraft {
    GroceryItemDraft {
        name: name.to_string(),
        quantity: 1,
        unit: None,
    }
}

/// Create a mock meal plan with default test values.
///
/// # Arguments
/// - `id` - Record id to use
/// - `date` - Calendar day the meal is planned for
/// - `slot` - Which meal of the day
/// - `title` - Display title
///
/// # Returns
/// - `MealPlan` - A planned meal with test data
pub fn mock_meal_plan(id: &str, date: NaiveDate, slot: MealSlot, title: &str) -> MealPlan {
    MealPlan {
        id: id.to_string(),
        date,
        slot,
        recipe_id: None,
        title: title.to_string(),
        created_at: mock_timestamp(),
        updated_at: mock_timestamp(),
    }
}

/// Create a mock meal plan draft with default test values.
pub fn mock_meal_plan_draft(date: NaiveDate, slot: MealSlot, title: &str) -> MealPlanDraft {
    MealPlanDraft {
        date,
        slot,
        recipe_id: None,
        title: title.to_string(),
    }
}

/// Create a mock recipe with default test values.
///
/// # Arguments
/// - `id` - Record id to use
/// - `name` - Recipe name
///
/// # Returns
/// - `Recipe` - A saved recipe with test data
pub fn mock_recipe(id: &str, name: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        tags: vec!["반찬".to_string()],
        servings: 2,
        link: None,
        created_at: mock_timestamp(),
        updated_at: mock_timestamp(),
    }
}

/// Create a mock recipe draft with default test values.
pub fn mock_recipe_draft(name: &str) -> RecipeDraft {
    RecipeDraft {
        name: name.to_string(),
        tags: Vec::new(),
        servings: 2,
        link: None,
    }
}

/// Create a mock category with default test values.
///
/// # Arguments
/// - `id` - Record id to use
/// - `name` - Category name
/// - `kind` - Income or expense grouping
/// - `sort_order` - Display position
///
/// # Returns
/// - `Category` - A transaction category with test data
pub fn mock_category(id: &str, name: &str, kind: CategoryKind, sort_order: i32) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        color: Some("#f4a261".to_string()),
        sort_order,
        created_at: mock_timestamp(),
        updated_at: mock_timestamp(),
    }
}

/// Create a mock category draft with default test values.
pub fn mock_category_draft(name: &str, kind: CategoryKind) -> CategoryDraft {
    CategoryDraft {
        name: name.to_string(),
        kind,
        color: None,
        sort_order: 0,
    }
}
