//! Data models
//!
//! Meal records as stored, and the per-day values derived from them.

mod daily_totals;
mod meal_record;
mod nutrition;
mod nutrition_plan;

pub use daily_totals::DailyTotals;
pub use meal_record::{Categorical, Energy, MealRecord, Mood, ProcessingLevel, Satiety};
pub use nutrition::Nutrients;
pub use nutrition_plan::NutritionPlan;
