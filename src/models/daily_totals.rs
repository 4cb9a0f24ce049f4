//! Daily Totals model
//!
//! Per-day aggregate of meal records. Derived on every statistics request
//! and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Energy, Mood, Nutrients, Satiety};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub nutrients: Nutrients,
    pub meal_count: u32,
    /// Meals flagged processed or highly processed
    pub processed_meal_count: u32,
    /// Meals whose description names a vegetable or fruit
    pub plant_meal_count: u32,
    pub mean_quality: f64,
    /// Earliest and latest meal hour of the day (UTC, 0-23)
    pub first_meal_hour: u32,
    pub last_meal_hour: u32,
    pub mood: Option<Mood>,
    pub energy: Option<Energy>,
    pub satiety: Option<Satiety>,
}

impl DailyTotals {
    /// Whether calories fall within `[low, high]` fractions of the goal
    pub fn calories_within(&self, goal: f64, low: f64, high: f64) -> bool {
        let calories = self.nutrients.calories;
        calories >= goal * low && calories <= goal * high
    }
}
