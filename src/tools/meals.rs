//! Meal and Nutrition Plan Tools
//!
//! Logging, listing and deleting meals, and setting the calorie goal.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::Database;
use super::{ToolError, ToolResult};
use crate::models::{MealRecord, NutritionPlan};

/// Response for list_meals
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub user_id: String,
    pub start: String,
    pub end: String,
    pub meals: Vec<MealRecord>,
    pub total: usize,
}

/// Response for delete_meal
#[derive(Debug, Serialize)]
pub struct DeleteMealResponse {
    pub id: i64,
    pub deleted: bool,
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(field: &str, value: &str) -> ToolResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ToolError::InvalidInput(format!("Invalid {} '{}': {}", field, value, e)))
}

fn validate_meal(meal: &MealRecord) -> ToolResult<()> {
    if meal.user_id.trim().is_empty() {
        return Err(ToolError::InvalidInput("user_id is required".to_string()));
    }

    let nutrients = [
        ("calories", meal.calories),
        ("protein_g", meal.protein_g),
        ("carbs_g", meal.carbs_g),
        ("fats_g", meal.fats_g),
        ("fiber_g", meal.fiber_g),
        ("sugar_g", meal.sugar_g),
        ("sodium_mg", meal.sodium_mg),
        ("liquids_ml", meal.liquids_ml),
        ("alcohol_g", meal.alcohol_g),
        ("caffeine_mg", meal.caffeine_mg),
    ];
    for (name, value) in nutrients {
        if !value.is_finite() || value < 0.0 {
            return Err(ToolError::InvalidInput(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    if let Some(quality) = meal.meal_quality {
        if quality > 10 {
            return Err(ToolError::InvalidInput(format!(
                "meal_quality must be between 0 and 10, got {}",
                quality
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Meal Tools
// ============================================================================

/// Store a meal record
pub fn log_meal(db: &Database, meal: MealRecord) -> ToolResult<MealRecord> {
    validate_meal(&meal)?;

    let conn = db.get_conn().map_err(|e| ToolError::Storage(format!("Database error: {}", e)))?;
    let stored = MealRecord::insert(&conn, &meal).map_err(|e| ToolError::Storage(format!("Failed to log meal: {}", e)))?;

    tracing::info!(id = stored.id, user_id = %stored.user_id, "Logged meal");
    Ok(stored)
}

/// List a user's meals in `[start, end)`, oldest first
pub fn list_meals(db: &Database, user_id: &str, start: &str, end: &str) -> ToolResult<ListMealsResponse> {
    let start_ts = parse_timestamp("start", start)?;
    let end_ts = parse_timestamp("end", end)?;
    if start_ts > end_ts {
        return Err(ToolError::InvalidInput(format!("start {} is after end {}", start, end)));
    }

    let conn = db.get_conn().map_err(|e| ToolError::Storage(format!("Database error: {}", e)))?;
    let meals = MealRecord::list_for_window(&conn, user_id, &start_ts, &end_ts)
        .map_err(|e| ToolError::Storage(format!("Failed to list meals: {}", e)))?;

    Ok(ListMealsResponse {
        user_id: user_id.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        total: meals.len(),
        meals,
    })
}

pub fn delete_meal(db: &Database, id: i64) -> ToolResult<DeleteMealResponse> {
    let conn = db.get_conn().map_err(|e| ToolError::Storage(format!("Database error: {}", e)))?;
    let deleted = MealRecord::delete(&conn, id).map_err(|e| ToolError::Storage(format!("Failed to delete meal: {}", e)))?;
    Ok(DeleteMealResponse { id, deleted })
}

// ============================================================================
// Nutrition Plan Tools
// ============================================================================

/// Set the user's daily calorie goal
pub fn set_calorie_goal(db: &Database, user_id: &str, daily_calorie_goal: f64) -> ToolResult<NutritionPlan> {
    if !daily_calorie_goal.is_finite() || daily_calorie_goal <= 0.0 {
        return Err(ToolError::InvalidInput(format!(
            "daily_calorie_goal must be positive, got {}",
            daily_calorie_goal
        )));
    }

    let conn = db.get_conn().map_err(|e| ToolError::Storage(format!("Database error: {}", e)))?;
    NutritionPlan::upsert(&conn, user_id, daily_calorie_goal)
        .map_err(|e| ToolError::Storage(format!("Failed to set calorie goal: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    fn meal(ts: &str, calories: f64) -> MealRecord {
        MealRecord {
            user_id: "alice".to_string(),
            calories,
            ..MealRecord::at(parse_timestamp("timestamp", ts).unwrap())
        }
    }

    #[test]
    fn test_log_and_list() {
        let db = test_db();
        log_meal(&db, meal("2025-03-01T08:00:00Z", 400.0)).unwrap();
        log_meal(&db, meal("2025-03-01T12:30:00+02:00", 700.0)).unwrap();
        log_meal(&db, meal("2025-03-03T08:00:00Z", 500.0)).unwrap();

        let response = list_meals(&db, "alice", "2025-03-01T00:00:00Z", "2025-03-02T00:00:00Z").unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.meals[1].calories, 700.0);
        assert_eq!(response.meals[1].timestamp.to_rfc3339(), "2025-03-01T10:30:00+00:00");
    }

    #[test]
    fn test_log_rejects_invalid_values() {
        let db = test_db();

        let mut negative = meal("2025-03-01T08:00:00Z", -5.0);
        assert!(log_meal(&db, negative.clone()).is_err());

        negative.calories = 100.0;
        negative.meal_quality = Some(11);
        assert!(log_meal(&db, negative.clone()).is_err());

        negative.meal_quality = Some(7);
        negative.user_id = " ".to_string();
        assert!(log_meal(&db, negative).is_err());
    }

    #[test]
    fn test_list_rejects_bad_bounds() {
        let db = test_db();
        assert!(list_meals(&db, "alice", "yesterday", "2025-03-02T00:00:00Z").is_err());
        assert!(list_meals(&db, "alice", "2025-03-05T00:00:00Z", "2025-03-02T00:00:00Z").is_err());
    }

    #[test]
    fn test_delete_meal() {
        let db = test_db();
        let stored = log_meal(&db, meal("2025-03-01T08:00:00Z", 400.0)).unwrap();
        assert!(delete_meal(&db, stored.id).unwrap().deleted);
        assert!(!delete_meal(&db, stored.id).unwrap().deleted);
    }

    #[test]
    fn test_set_calorie_goal() {
        let db = test_db();
        assert!(set_calorie_goal(&db, "alice", 0.0).is_err());
        let plan = set_calorie_goal(&db, "alice", 1850.0).unwrap();
        assert_eq!(plan.daily_calorie_goal, 1850.0);
    }
}
