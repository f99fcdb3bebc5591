//! Meal plans: resource wiring and calendar lookups.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use entity::meal_plan::{MealPlan, MealPlanDraft, MealPlanPatch, MealSlot};

use crate::controller::config::{ControllerConfig, InsertPosition};
use crate::resource::Resource;

/// Marker type wiring meal plans into the controller.
pub struct MealPlans;

/// Filters for meal plan queries: an inclusive date window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealPlanFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl MealPlanFilters {
    /// Filters covering the seven days starting at `week_start`.
    pub fn for_week(week_start: NaiveDate) -> Self {
        Self {
            start_date: Some(week_start),
            end_date: Some(week_start + Duration::days(6)),
        }
    }
}

impl Resource for MealPlans {
    type Entity = MealPlan;
    type Draft = MealPlanDraft;
    type Patch = MealPlanPatch;
    type Filters = MealPlanFilters;

    const NAME: &'static str = "meal_plans";

    fn id(entity: &MealPlan) -> &str {
        &entity.id
    }

    fn from_draft(draft: &MealPlanDraft, id: String, now: DateTime<Utc>) -> MealPlan {
        MealPlan {
            id,
            date: draft.date,
            slot: draft.slot,
            recipe_id: draft.recipe_id.clone(),
            title: draft.title.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(entity: &mut MealPlan, patch: &MealPlanPatch) {
        if let Some(date) = patch.date {
            entity.date = date;
        }
        if let Some(slot) = patch.slot {
            entity.slot = slot;
        }
        if let Some(recipe_id) = &patch.recipe_id {
            entity.recipe_id = Some(recipe_id.clone());
        }
        if let Some(title) = &patch.title {
            entity.title = title.clone();
        }
    }

    fn config() -> ControllerConfig {
        ControllerConfig::new(5 * 60).with_insert_position(InsertPosition::Back)
    }
}

/// Day order for a meal slot, breakfast first.
fn slot_order(slot: MealSlot) -> u8 {
    match slot {
        MealSlot::Breakfast => 0,
        MealSlot::Lunch => 1,
        MealSlot::Dinner => 2,
        MealSlot::Snack => 3,
    }
}

/// Plans for one day, ordered breakfast to snack.
pub fn plans_on(items: &[MealPlan], date: NaiveDate) -> Vec<&MealPlan> {
    let mut plans: Vec<&MealPlan> = items.iter().filter(|plan| plan.date == date).collect();
    plans.sort_by_key(|plan| slot_order(plan.slot));
    plans
}

/// Plans within the seven days starting at `week_start`, ordered by day and
/// then by slot.
pub fn plans_in_week(items: &[MealPlan], week_start: NaiveDate) -> Vec<&MealPlan> {
    let week_end = week_start + Duration::days(6);
    let mut plans: Vec<&MealPlan> = items
        .iter()
        .filter(|plan| plan.date >= week_start && plan.date <= week_end)
        .collect();
    plans.sort_by_key(|plan| (plan.date, slot_order(plan.slot)));
    plans
}
