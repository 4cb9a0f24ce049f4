//! Meal Statistics MCP Server Implementation
//!
//! Exposes meal logging and nutrition statistics as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{Categorical, Energy, MealRecord, Mood, ProcessingLevel, Satiety};
use crate::stats::StatsConfig;
use crate::tools::meals;
use crate::tools::statistics;
use crate::tools::status::StatusTracker;
use crate::tools::ToolError;

/// Meal Statistics MCP Service
#[derive(Clone)]
pub struct MealStatService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    config: Arc<StatsConfig>,
    tool_router: ToolRouter<MealStatService>,
}

impl MealStatService {
    pub fn new(database_path: PathBuf, database: Database, config: StatsConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

impl From<ToolError> for McpError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::InvalidInput(msg) => McpError::invalid_params(msg, None),
            ToolError::Storage(msg) => McpError::internal_error(msg, None),
        }
    }
}

/// Parse an optional categorical parameter, rejecting unknown values
fn parse_category<T: Categorical>(field: &str, value: Option<String>) -> Result<Option<T>, McpError> {
    match value {
        None => Ok(None),
        Some(s) => T::from_str(&s).map(Some).ok_or_else(|| {
            let allowed: Vec<&str> = T::VARIANTS.iter().map(|v| v.as_str()).collect();
            McpError::invalid_params(
                format!("Invalid {} '{}', expected one of: {}", field, s, allowed.join(", ")),
                None,
            )
        }),
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    pub user_id: String,
    /// RFC 3339 timestamp, e.g. "2025-03-10T08:30:00Z"
    pub timestamp: String,
    /// Short description naming the main foods
    pub description: Option<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fats_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub sugar_g: f64,
    #[serde(default)]
    pub sodium_mg: f64,
    #[serde(default)]
    pub liquids_ml: f64,
    #[serde(default)]
    pub alcohol_g: f64,
    #[serde(default)]
    pub caffeine_mg: f64,
    /// unprocessed, processed, or highly_processed
    pub processing_level: Option<String>,
    /// 1-10
    pub meal_quality: Option<u8>,
    /// happy, neutral, or sad
    pub mood: Option<String>,
    /// high, medium, or low
    pub energy: Option<String>,
    /// satisfied, full, or hungry
    pub satiety: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListMealsParams {
    pub user_id: String,
    /// Inclusive RFC 3339 start
    pub start: String,
    /// Exclusive RFC 3339 end
    pub end: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteMealParams {
    /// Meal record ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCalorieGoalParams {
    pub user_id: String,
    pub daily_calorie_goal: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StatisticsParams {
    pub user_id: String,
    /// today, week, month, or custom
    #[serde(default = "default_period")]
    pub period: String,
    /// Optional RFC 3339 start (requires end)
    pub start: Option<String>,
    /// Optional RFC 3339 end (requires start)
    pub end: Option<String>,
}

fn default_period() -> String {
    "week".to_string()
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MealStatService {
    // --- Status ---

    #[tool(description = "Get the current status of the meal statistics service including build info, database status, and process information")]
    async fn mealstat_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status(&self.database))
    }

    #[tool(description = "Get instructions for logging meals and reading nutrition statistics. Call this when starting a logging session.")]
    fn meal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::MEAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(MEAL_INSTRUCTIONS)]))
    }

    // --- Meals ---

    #[tool(description = "Log a meal with its nutrients and optional context (processing level, quality 1-10, mood, energy, satiety, allergens)")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let timestamp = meals::parse_timestamp("timestamp", &p.timestamp)?;

        let record = MealRecord {
            id: 0,
            user_id: p.user_id,
            timestamp,
            description: p.description,
            calories: p.calories,
            protein_g: p.protein_g,
            carbs_g: p.carbs_g,
            fats_g: p.fats_g,
            fiber_g: p.fiber_g,
            sugar_g: p.sugar_g,
            sodium_mg: p.sodium_mg,
            liquids_ml: p.liquids_ml,
            alcohol_g: p.alcohol_g,
            caffeine_mg: p.caffeine_mg,
            processing_level: parse_category::<ProcessingLevel>("processing_level", p.processing_level)?,
            meal_quality: p.meal_quality,
            mood: parse_category::<Mood>("mood", p.mood)?,
            energy: parse_category::<Energy>("energy", p.energy)?,
            satiety: parse_category::<Satiety>("satiety", p.satiety)?,
            allergens: p.allergens,
        };

        let result = meals::log_meal(&self.database, record)?;
        to_json(&result)
    }

    #[tool(description = "List a user's meals between start (inclusive) and end (exclusive), oldest first")]
    fn list_meals(&self, Parameters(p): Parameters<ListMealsParams>) -> Result<CallToolResult, McpError> {
        let result = meals::list_meals(&self.database, &p.user_id, &p.start, &p.end)?;
        to_json(&result)
    }

    #[tool(description = "Delete a logged meal")]
    fn delete_meal(&self, Parameters(p): Parameters<DeleteMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::delete_meal(&self.database, p.id)?;
        to_json(&result)
    }

    #[tool(description = "Set a user's daily calorie goal (defaults to 2000 kcal when unset)")]
    fn set_calorie_goal(&self, Parameters(p): Parameters<SetCalorieGoalParams>) -> Result<CallToolResult, McpError> {
        let result = meals::set_calorie_goal(&self.database, &p.user_id, p.daily_calorie_goal)?;
        to_json(&result)
    }

    // --- Statistics ---

    #[tool(description = "Get nutrition statistics for a period: per-logged-day averages, goal percentages, nutrition score (0-100), weekly trends, streaks, goal days, XP/level, allergen alerts, eating window, and previous-period averages")]
    fn get_nutrition_statistics(&self, Parameters(p): Parameters<StatisticsParams>) -> Result<CallToolResult, McpError> {
        let report = statistics::get_nutrition_statistics(
            &self.database,
            &self.config,
            &p.user_id,
            &p.period,
            p.start.as_deref(),
            p.end.as_deref(),
        )?;
        to_json(&report)
    }

    #[tool(description = "Get a compact digest of a period's statistics with rule-based highlights, for writing feedback or recommendations")]
    fn get_insight_context(&self, Parameters(p): Parameters<StatisticsParams>) -> Result<CallToolResult, McpError> {
        let context = statistics::get_insight_context(
            &self.database,
            &self.config,
            &p.user_id,
            &p.period,
            p.start.as_deref(),
            p.end.as_deref(),
        )?;
        to_json(&context)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MealStatService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealstat".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Meal Statistics".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Meal Statistics - meal logging, nutrition statistics and gamified progress. \
                 Call meal_instructions first. \
                 Meals: log_meal/list_meals/delete_meal. Goal: set_calorie_goal. \
                 Statistics: get_nutrition_statistics (period today|week|month|custom), get_insight_context."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use rmcp::model::ErrorCode;

    fn test_service() -> MealStatService {
        let database = Database::in_memory().unwrap();
        database.with_conn(run_migrations).unwrap();
        MealStatService::new(PathBuf::from(":memory:"), database, StatsConfig::default())
    }

    fn stats_params(period: &str, start: Option<&str>, end: Option<&str>) -> Parameters<StatisticsParams> {
        Parameters(StatisticsParams {
            user_id: "alice".to_string(),
            period: period.to_string(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        })
    }

    fn meal_params(timestamp: &str, meal_quality: Option<u8>) -> Parameters<LogMealParams> {
        serde_json::from_value(serde_json::json!({
            "user_id": "alice",
            "timestamp": timestamp,
            "calories": 650.0,
            "meal_quality": meal_quality,
        }))
        .map(Parameters)
        .unwrap()
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category::<Mood>("mood", None).unwrap(), None);
        assert_eq!(parse_category::<Mood>("mood", Some("Sad".to_string())).unwrap(), Some(Mood::Sad));
        assert!(parse_category::<Energy>("energy", Some("electric".to_string())).is_err());
    }

    #[test]
    fn test_statistics_params_default_period() {
        let p: StatisticsParams = serde_json::from_str(r#"{"user_id": "alice"}"#).unwrap();
        assert_eq!(p.period, "week");
        assert!(p.start.is_none());
    }

    #[test]
    fn test_statistics_handlers_serve_reports() {
        let service = test_service();
        service.log_meal(meal_params("2025-03-09T12:00:00Z", Some(9))).unwrap();

        let result = service
            .get_nutrition_statistics(stats_params(
                "custom",
                Some("2025-03-09T00:00:00Z"),
                Some("2025-03-10T00:00:00Z"),
            ))
            .unwrap();
        assert_ne!(result.is_error, Some(true));

        let result = service
            .get_insight_context(stats_params("week", None, None))
            .unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_bad_requests_map_to_invalid_params() {
        let service = test_service();

        let err = service.get_nutrition_statistics(stats_params("yearly", None, None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = service.log_meal(meal_params("2025-03-09T12:00:00Z", Some(12))).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = service
            .set_calorie_goal(Parameters(SetCalorieGoalParams {
                user_id: "alice".to_string(),
                daily_calorie_goal: -100.0,
            }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = service
            .list_meals(Parameters(ListMealsParams {
                user_id: "alice".to_string(),
                start: "2025-03-10T00:00:00Z".to_string(),
                end: "2025-03-01T00:00:00Z".to_string(),
            }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }
}
