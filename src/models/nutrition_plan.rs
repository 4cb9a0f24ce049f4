//! Nutrition Plan model
//!
//! A user's active daily calorie goal.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub user_id: String,
    pub daily_calorie_goal: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl NutritionPlan {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get("user_id")?,
            daily_calorie_goal: row.get("daily_calorie_goal")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the plan for a user, if one exists
    pub fn get_for_user(conn: &Connection, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM nutrition_plans WHERE user_id = ?1")?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(plan) => Ok(Some(plan)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or replace the user's calorie goal
    pub fn upsert(conn: &Connection, user_id: &str, daily_calorie_goal: f64) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO nutrition_plans (user_id, daily_calorie_goal)
            VALUES (?1, ?2)
            ON CONFLICT(user_id) DO UPDATE SET
                daily_calorie_goal = excluded.daily_calorie_goal,
                updated_at = datetime('now')
            "#,
            params![user_id, daily_calorie_goal],
        )?;

        Self::get_for_user(conn, user_id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_upsert_replaces_goal() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert!(NutritionPlan::get_for_user(&conn, "alice").unwrap().is_none());

        NutritionPlan::upsert(&conn, "alice", 1800.0).unwrap();
        let plan = NutritionPlan::upsert(&conn, "alice", 2200.0).unwrap();
        assert_eq!(plan.daily_calorie_goal, 2200.0);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM nutrition_plans", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
