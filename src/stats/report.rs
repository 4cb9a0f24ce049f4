//! Statistics report
//!
//! The engine's single output, assembled from every other stats component.
//! Field names are the JSON contract with clients and must not change.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregator::aggregate_daily;
use super::bucketer::bucket_by_day;
use super::comparison::{previous_period, PreviousPeriod};
use super::config::StatsConfig;
use super::gamification::{tally, Progression};
use super::goals::{count_goal_days, GoalAchievements};
use super::streaks::{compute_streaks, StreakStats};
use super::summarizer::{summarize, EatingHours, PeriodSummary, WeeklyTrends};
use super::window::{PeriodKind, PeriodWindow};
use crate::models::{DailyTotals, MealRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub period: PeriodKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_calorie_goal: f64,
    /// Days with at least one meal; the denominator of every average
    pub total_days: u32,
    pub total_meals: u32,

    pub average_calories_daily: f64,
    pub average_protein_daily: f64,
    pub average_carbs_daily: f64,
    pub average_fats_daily: f64,
    pub average_fiber_daily: f64,
    pub average_sugar_daily: f64,
    pub average_sodium_daily: f64,
    pub average_liquids_daily: f64,
    pub average_alcohol_daily: f64,
    pub average_caffeine_daily: f64,

    pub calorie_goal_achievement_percent: u32,
    pub processed_food_percentage: u32,
    pub full_logging_percentage: u32,
    pub vegetable_fruit_intake: u32,
    pub nutrition_score: u32,
    pub weekly_trends: WeeklyTrends,

    #[serde(flatten)]
    pub streaks: StreakStats,
    #[serde(flatten)]
    pub goals: GoalAchievements,
    #[serde(flatten)]
    pub progression: Progression,

    pub allergen_alerts: Vec<String>,
    pub missed_meals_alert: u32,
    pub average_eating_hours: EatingHours,
    pub intermittent_fasting_hours: u32,

    #[serde(flatten)]
    pub previous: PreviousPeriod,

    pub daily_breakdown: Vec<DailyTotals>,
}

fn round_percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

impl StatisticsReport {
    /// Canonical report for a window without meals: zero averages and
    /// percentages, empty collections, default eating hours
    pub fn empty(window: &PeriodWindow, daily_calorie_goal: f64, config: &StatsConfig) -> Self {
        Self::assemble(
            window,
            daily_calorie_goal,
            PeriodSummary::empty(config),
            StreakStats::default(),
            GoalAchievements::default(),
            Progression::default(),
            Vec::new(),
            PreviousPeriod::default(),
            Vec::new(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        window: &PeriodWindow,
        daily_calorie_goal: f64,
        summary: PeriodSummary,
        streaks: StreakStats,
        goals: GoalAchievements,
        progression: Progression,
        allergen_alerts: Vec<String>,
        previous: PreviousPeriod,
        daily_breakdown: Vec<DailyTotals>,
    ) -> Self {
        let avg = summary.averages.rounded();
        Self {
            period: window.kind,
            start_date: window.start_date(),
            end_date: window.end_date(),
            daily_calorie_goal,
            total_days: summary.total_days,
            total_meals: summary.total_meals,
            average_calories_daily: avg.calories,
            average_protein_daily: avg.protein,
            average_carbs_daily: avg.carbs,
            average_fats_daily: avg.fats,
            average_fiber_daily: avg.fiber,
            average_sugar_daily: avg.sugar,
            average_sodium_daily: avg.sodium,
            average_liquids_daily: avg.liquids,
            average_alcohol_daily: avg.alcohol,
            average_caffeine_daily: avg.caffeine,
            calorie_goal_achievement_percent: round_percent(summary.calorie_goal_achievement_percent),
            processed_food_percentage: round_percent(summary.processed_food_percentage),
            full_logging_percentage: round_percent(summary.full_logging_percentage),
            vegetable_fruit_intake: round_percent(summary.vegetable_fruit_intake),
            nutrition_score: summary.nutrition_score,
            weekly_trends: summary.weekly_trends,
            streaks,
            goals,
            progression,
            allergen_alerts,
            missed_meals_alert: summary.missed_meals_alert,
            average_eating_hours: EatingHours::from_hours(summary.eating_start_hour, summary.eating_end_hour),
            intermittent_fasting_hours: summary.intermittent_fasting_hours,
            previous,
            daily_breakdown,
        }
    }
}

/// Distinct allergen tags across meals, trimmed and lowercased, sorted
pub fn allergen_alerts<'a, I>(meals: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a MealRecord>,
{
    meals
        .into_iter()
        .flat_map(|m| m.allergens.iter())
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Chronological view of the meals inside `window`
fn meals_in_window<'a>(meals: &'a [MealRecord], window: &PeriodWindow) -> Vec<&'a MealRecord> {
    let mut selected: Vec<&MealRecord> = meals.iter().filter(|m| window.contains(&m.timestamp)).collect();
    selected.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
    selected
}

/// Compute the full report for `window`.
///
/// `meals` are the records for the window and `previous_meals` those for
/// `window.previous()`; records outside their window are ignored and
/// ordering does not matter. Pure and deterministic.
pub fn compute_report(
    meals: &[MealRecord],
    previous_meals: &[MealRecord],
    window: &PeriodWindow,
    daily_calorie_goal: f64,
    config: &StatsConfig,
) -> StatisticsReport {
    let goal = config.resolve_calorie_goal(Some(daily_calorie_goal));
    let current = meals_in_window(meals, window);
    let previous = previous_period(meals_in_window(previous_meals, &window.previous()), config);

    if current.is_empty() {
        tracing::debug!(period = %window.kind, "No meals in window, returning empty report");
        return StatisticsReport {
            previous,
            ..StatisticsReport::empty(window, goal, config)
        };
    }

    let days = aggregate_daily(&bucket_by_day(current.iter().copied()), config);
    let summary = summarize(&days, goal, config);
    let streaks = compute_streaks(&days, goal, config);
    let goals = count_goal_days(&days, goal, config);
    let progression = tally(current.iter().copied(), config);
    let allergens = allergen_alerts(current.iter().copied());

    tracing::debug!(
        period = %window.kind,
        days = summary.total_days,
        meals = summary.total_meals,
        score = summary.nutrition_score,
        "Computed statistics report"
    );

    StatisticsReport::assemble(
        window,
        goal,
        summary,
        streaks,
        goals,
        progression,
        allergens,
        previous,
        days,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessingLevel;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 21, 0, 0).unwrap()
    }

    fn week() -> PeriodWindow {
        PeriodWindow::ending_at(PeriodKind::Week, now())
    }

    /// Meal `days_ago` days before `now()` at the given hour
    fn meal(days_ago: i64, hour: u32, calories: f64) -> MealRecord {
        let date = (now() - Duration::days(days_ago)).date_naive();
        let ts = date.and_hms_opt(hour, 0, 0).unwrap().and_utc();
        MealRecord {
            user_id: "alice".to_string(),
            calories,
            protein_g: 40.0,
            fiber_g: 8.0,
            sodium_mg: 700.0,
            ..MealRecord::at(ts)
        }
    }

    #[test]
    fn test_empty_input_gives_canonical_report() {
        let config = StatsConfig::default();
        let report = compute_report(&[], &[], &week(), 2000.0, &config);

        assert_eq!(report.nutrition_score, 0);
        assert_eq!(report.total_days, 0);
        assert_eq!(report.average_calories_daily, 0.0);
        assert_eq!(report.calorie_goal_achievement_percent, 0);
        assert!(report.weekly_trends.calories.is_empty());
        assert!(report.weekly_trends.fats.is_empty());
        assert!(report.allergen_alerts.is_empty());
        assert_eq!(report.average_eating_hours, EatingHours::from_hours(8, 20));
        assert_eq!(report.streaks, StreakStats::default());
        assert_eq!(report.progression.total_points, 0);
        assert_eq!(report.previous, PreviousPeriod::default());
    }

    #[test]
    fn test_meals_outside_window_are_ignored() {
        let config = StatsConfig::default();
        let meals = vec![meal(30, 12, 500.0)];
        let report = compute_report(&meals, &[], &week(), 2000.0, &config);
        assert_eq!(report, StatisticsReport::empty(&week(), 2000.0, &config));
    }

    #[test]
    fn test_averages_over_logged_days_only() {
        let config = StatsConfig::default();
        // 3 distinct days out of 7
        let meals = vec![
            meal(0, 8, 600.0),
            meal(0, 19, 900.0),
            meal(2, 12, 2100.0),
            meal(5, 13, 1800.0),
        ];
        let report = compute_report(&meals, &[], &week(), 2000.0, &config);

        assert_eq!(report.total_days, 3);
        assert_eq!(report.total_meals, 4);
        assert_eq!(report.average_calories_daily, 1800.0);
        assert_eq!(report.average_protein_daily, 53.0);
        assert_eq!(report.weekly_trends.calories, vec![1800.0, 2100.0, 1500.0]);
        assert_eq!(report.daily_breakdown.len(), 3);
    }

    #[test]
    fn test_full_report_fields() {
        let config = StatsConfig::default();
        let mut meals = vec![meal(1, 7, 700.0), meal(1, 12, 700.0), meal(1, 20, 600.0), meal(0, 9, 1950.0)];
        meals[0].allergens = vec!["peanuts".to_string()];
        meals[1].allergens = vec!["Peanuts ".to_string(), "gluten".to_string()];
        meals[2].processing_level = Some(ProcessingLevel::Processed);
        meals[3].meal_quality = Some(9);

        let report = compute_report(&meals, &[], &week(), 2000.0, &config);

        assert_eq!(report.allergen_alerts, vec!["gluten".to_string(), "peanuts".to_string()]);
        assert_eq!(report.calorie_goal_achievement_percent, 100);
        assert_eq!(report.full_logging_percentage, 50);
        assert_eq!(report.processed_food_percentage, 25);
        assert_eq!(report.streaks.current_streak, 2);
        assert_eq!(report.streaks.best_streak, 2);
        assert_eq!(report.goals.perfect_days, 1);
        // 3 unrated meals at 75 plus one rated 9 at 150
        assert_eq!(report.progression.total_points, 375);
        assert_eq!(report.progression.level, 1);
        assert_eq!(report.missed_meals_alert, 17);
        assert_eq!(report.average_eating_hours, EatingHours::from_hours(7, 20));
        assert_eq!(report.intermittent_fasting_hours, 11);
        assert!(report.nutrition_score <= 100);
    }

    #[test]
    fn test_previous_period_baseline() {
        let config = StatsConfig::default();
        let current = vec![meal(0, 12, 2000.0)];
        let previous = vec![meal(8, 12, 1500.0), meal(9, 12, 2500.0), meal(0, 12, 9999.0)];

        let report = compute_report(&current, &previous, &week(), 2000.0, &config);
        assert_eq!(report.previous.previous_calories_daily, 2000.0);
        assert_eq!(report.previous.previous_sodium_daily, 700.0);
    }

    #[test]
    fn test_invalid_goal_falls_back_to_default() {
        let config = StatsConfig::default();
        let report = compute_report(&[meal(0, 12, 2000.0)], &[], &week(), 0.0, &config);
        assert_eq!(report.daily_calorie_goal, 2000.0);
        assert_eq!(report.calorie_goal_achievement_percent, 100);
    }

    #[test]
    fn test_report_is_idempotent_and_order_independent() {
        let config = StatsConfig::default();
        let meals = vec![meal(3, 8, 500.0), meal(0, 12, 800.0), meal(3, 19, 1400.0), meal(1, 13, 2100.0)];
        let mut shuffled = meals.clone();
        shuffled.reverse();

        let first = compute_report(&meals, &[], &week(), 2000.0, &config);
        let second = compute_report(&meals, &[], &week(), 2000.0, &config);
        let third = compute_report(&shuffled, &[], &week(), 2000.0, &config);

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_json_field_names() {
        let config = StatsConfig::default();
        let report = compute_report(&[meal(0, 12, 2000.0)], &[], &week(), 2000.0, &config);
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "average_calories_daily",
            "calorie_goal_achievement_percent",
            "processed_food_percentage",
            "full_logging_percentage",
            "nutrition_score",
            "weekly_trends",
            "currentStreak",
            "bestStreak",
            "proteinGoalDays",
            "hydrationGoalDays",
            "balancedMealDays",
            "fiberGoalDays",
            "perfectDays",
            "weeklyStreak",
            "totalPoints",
            "level",
            "currentXP",
            "allergen_alerts",
            "missed_meals_alert",
            "average_eating_hours",
            "intermittent_fasting_hours",
            "previous_calories_daily",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["period"], "week");
        assert_eq!(json["average_eating_hours"]["start"], "12:00");
    }

    #[test]
    fn test_empty_window_keeps_previous_baseline() {
        let config = StatsConfig::default();
        let previous = vec![meal(8, 12, 1800.0), meal(10, 12, 2200.0)];

        let report = compute_report(&[], &previous, &week(), 2000.0, &config);
        assert_eq!(report.total_days, 0);
        assert_eq!(report.nutrition_score, 0);
        assert_eq!(report.average_calories_daily, 0.0);
        assert_eq!(report.previous.previous_calories_daily, 2000.0);
    }
}
