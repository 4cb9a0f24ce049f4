//! SQLite-backed meal record source

use chrono::{DateTime, Utc};

use super::{Database, DbError};
use crate::models::{MealRecord, NutritionPlan};
use crate::stats::MealRecordSource;

impl MealRecordSource for Database {
    type Error = DbError;

    fn fetch_meals(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MealRecord>, DbError> {
        self.with_conn(|conn| MealRecord::list_for_window(conn, user_id, &start, &end))
    }

    fn daily_calorie_goal(&self, user_id: &str) -> Result<Option<f64>, DbError> {
        self.with_conn(|conn| {
            Ok(NutritionPlan::get_for_user(conn, user_id)?.map(|p| p.daily_calorie_goal))
        })
    }
}
