//! Status Tool
//!
//! Runtime status of the service, plus the logging guide for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database};

/// Meal logging and statistics instructions for AI assistants
pub const MEAL_INSTRUCTIONS: &str = r#"
# Meal Logging & Statistics Instructions

## Logging a meal

Call `log_meal` once per meal with:
- `user_id` and `timestamp` (RFC 3339, e.g. "2025-03-10T08:30:00Z")
- nutrients: `calories`, `protein_g`, `carbs_g`, `fats_g`, `fiber_g`, `sugar_g`,
  `sodium_mg`, `liquids_ml`, `alcohol_g`, `caffeine_mg` (omit unknown values; they count as 0)
- optional context: `processing_level` (unprocessed | processed | highly_processed),
  `meal_quality` (1-10), `mood` (happy | neutral | sad), `energy` (high | medium | low),
  `satiety` (satisfied | full | hungry), `allergens` (list), `description`

A short `description` naming the main foods ("salmon with broccoli") lets the
statistics estimate vegetable and fruit intake.

## Calorie goal

`set_calorie_goal` stores the user's daily target. Without one, 2000 kcal is used.

## Statistics

`get_nutrition_statistics` with `period` = today | week | month | custom.
For custom ranges pass both `start` and `end` (RFC 3339).

- Averages are per LOGGED day: 3 logged days in a week average over 3, not 7.
- `nutrition_score` is 0-100.
- `currentStreak` / `bestStreak` count days within 80-120% of the calorie goal.
- `previous_*_daily` fields are the averages of the preceding period of equal length.

`get_insight_context` returns a compact digest with rule-based highlights,
suitable as input for written feedback.
"#;

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,
    pub expected_schema_version: i32,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service runtime status
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, db: &Database) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let schema_version = match db.with_conn(migrations::get_schema_version) {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read schema version");
                None
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            expected_schema_version: migrations::SCHEMA_VERSION,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_schema_version() {
        let db = Database::in_memory().unwrap();
        db.with_conn(migrations::run_migrations).unwrap();

        let tracker = StatusTracker::new(PathBuf::from("does-not-exist.db"));
        let status = tracker.get_status(&db);
        assert_eq!(status.schema_version, Some(1));
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }
}
