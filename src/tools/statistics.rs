//! Statistics Tools
//!
//! Fetches meals and the calorie goal from a `MealRecordSource`, degrades
//! collaborator failures to defaults, and runs the statistics engine.

use chrono::{DateTime, Utc};

use super::{ToolError, ToolResult};
use crate::stats::{
    compute_report, InsightContext, MealRecordSource, PeriodKind, PeriodWindow, StatisticsReport,
    StatsConfig, StatsError,
};

impl From<StatsError> for ToolError {
    fn from(e: StatsError) -> Self {
        ToolError::InvalidInput(e.to_string())
    }
}

/// Build the reporting window from request parameters.
///
/// Explicit bounds need both `start` and `end`; without them the window is
/// the period's length of calendar days ending today.
pub fn resolve_window(
    period: &str,
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PeriodWindow, StatsError> {
    let kind: PeriodKind = period.parse()?;

    match (start, end) {
        (Some(start), Some(end)) => {
            let parse = |field: &str, value: &str| {
                DateTime::parse_from_rfc3339(value.trim())
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| StatsError::MalformedWindow(format!("invalid {} '{}': {}", field, value, e)))
            };
            PeriodWindow::new(parse("start", start)?, parse("end", end)?, kind)
        }
        (None, None) => Ok(PeriodWindow::ending_at(kind, now)),
        _ => Err(StatsError::MalformedWindow(
            "start and end must be given together".to_string(),
        )),
    }
}

/// Report for `user_id` over `window`.
///
/// Failing to fetch the window's own meals is an error. A failed goal lookup
/// falls back to the default goal and a failed previous-period fetch to an
/// empty baseline.
pub fn build_report<S: MealRecordSource>(
    source: &S,
    user_id: &str,
    window: &PeriodWindow,
    config: &StatsConfig,
) -> ToolResult<StatisticsReport> {
    let meals = source
        .fetch_meals(user_id, window.start, window.end)
        .map_err(|e| ToolError::Storage(format!("Failed to fetch meals: {}", e)))?;

    let previous_window = window.previous();
    let previous_meals = source
        .fetch_meals(user_id, previous_window.start, previous_window.end)
        .unwrap_or_else(|e| {
            tracing::warn!(user_id, error = %e, "Previous period fetch failed, using empty baseline");
            Vec::new()
        });

    let goal = match source.daily_calorie_goal(user_id) {
        Ok(goal) => config.resolve_calorie_goal(goal),
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Calorie goal lookup failed, using default");
            config.default_calorie_goal
        }
    };

    Ok(compute_report(&meals, &previous_meals, window, goal, config))
}

/// Statistics for a period ending now (or between explicit bounds)
pub fn get_nutrition_statistics<S: MealRecordSource>(
    source: &S,
    config: &StatsConfig,
    user_id: &str,
    period: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> ToolResult<StatisticsReport> {
    let window = resolve_window(period, start, end, Utc::now())?;
    build_report(source, user_id, &window, config)
}

/// Insight digest for the same request shape as `get_nutrition_statistics`
pub fn get_insight_context<S: MealRecordSource>(
    source: &S,
    config: &StatsConfig,
    user_id: &str,
    period: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> ToolResult<InsightContext> {
    let report = get_nutrition_statistics(source, config, user_id, period, start, end)?;
    Ok(InsightContext::from_report(&report, config))
}
