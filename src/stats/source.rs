//! Meal record source
//!
//! The engine's read-only view of stored meals.

use chrono::{DateTime, Utc};

use crate::models::MealRecord;

pub trait MealRecordSource {
    type Error: std::error::Error;

    /// A user's meals with `start <= timestamp < end`, in any order
    fn fetch_meals(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MealRecord>, Self::Error>;

    /// The user's daily calorie goal, or `None` without an active plan
    fn daily_calorie_goal(&self, user_id: &str) -> Result<Option<f64>, Self::Error>;
}
