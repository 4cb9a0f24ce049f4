//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!(version = 1, "Applied schema migration");
    }

    Ok(())
}

/// Highest applied schema version (0 for a fresh database)
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- MEAL RECORDS
        -- One row per logged meal
        -- ============================================
        CREATE TABLE meal_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            timestamp TEXT NOT NULL,             -- RFC 3339 UTC, e.g. "2025-01-09T08:30:00Z"
            description TEXT,

            -- Nutritional values (whole meal)
            calories REAL NOT NULL DEFAULT 0,
            protein_g REAL NOT NULL DEFAULT 0,
            carbs_g REAL NOT NULL DEFAULT 0,
            fats_g REAL NOT NULL DEFAULT 0,
            fiber_g REAL NOT NULL DEFAULT 0,
            sugar_g REAL NOT NULL DEFAULT 0,
            sodium_mg REAL NOT NULL DEFAULT 0,
            liquids_ml REAL NOT NULL DEFAULT 0,
            alcohol_g REAL NOT NULL DEFAULT 0,
            caffeine_mg REAL NOT NULL DEFAULT 0,

            -- Context
            processing_level TEXT CHECK(processing_level IN ('unprocessed', 'processed', 'highly_processed')),
            meal_quality INTEGER CHECK(meal_quality BETWEEN 0 AND 10),
            mood TEXT,
            energy TEXT,
            satiety TEXT,
            allergens TEXT NOT NULL DEFAULT '[]', -- JSON array of strings

            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meal_records_user_time ON meal_records(user_id, timestamp);

        -- ============================================
        -- NUTRITION PLANS
        -- Active daily calorie goal per user
        -- ============================================
        CREATE TABLE nutrition_plans (
            user_id TEXT PRIMARY KEY,
            daily_calorie_goal REAL NOT NULL CHECK(daily_calorie_goal > 0),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;
    Ok(())
}
