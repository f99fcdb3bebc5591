use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which meal of the day a plan entry covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One planned meal on the household calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub date: NaiveDate,
    pub slot: MealSlot,
    /// Link to a saved recipe, if the meal is cooked from one.
    pub recipe_id: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies when planning a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDraft {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe_id: Option<String>,
    pub title: String,
}

/// Partial update for a meal plan. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanPatch {
    pub date: Option<NaiveDate>,
    pub slot: Option<MealSlot>,
    pub recipe_id: Option<String>,
    pub title: Option<String>,
}
