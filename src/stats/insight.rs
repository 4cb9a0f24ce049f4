//! Insight context
//!
//! The digest handed to an external insight or recommendation generator.
//! Built only from report fields; nothing here depends on generated text.

use serde::Serialize;

use super::config::StatsConfig;
use super::report::StatisticsReport;
use super::window::PeriodKind;

/// Current average next to the previous period's
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientDelta {
    pub nutrient: &'static str,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightContext {
    pub period: PeriodKind,
    pub total_days: u32,
    pub nutrition_score: u32,
    pub daily_calorie_goal: f64,
    pub deltas: Vec<NutrientDelta>,
    pub current_streak: u32,
    pub best_streak: u32,
    pub level: u64,
    pub allergen_alerts: Vec<String>,
    /// Deterministic, rule-based observations
    pub highlights: Vec<String>,
}

impl InsightContext {
    pub fn from_report(report: &StatisticsReport, config: &StatsConfig) -> Self {
        let previous = &report.previous;
        let deltas = [
            ("calories", report.average_calories_daily, previous.previous_calories_daily),
            ("protein", report.average_protein_daily, previous.previous_protein_daily),
            ("carbs", report.average_carbs_daily, previous.previous_carbs_daily),
            ("fats", report.average_fats_daily, previous.previous_fats_daily),
            ("fiber", report.average_fiber_daily, previous.previous_fiber_daily),
            ("sodium", report.average_sodium_daily, previous.previous_sodium_daily),
        ]
        .into_iter()
        .map(|(nutrient, current, previous)| NutrientDelta {
            nutrient,
            current,
            previous,
            change: current - previous,
        })
        .collect();

        Self {
            period: report.period,
            total_days: report.total_days,
            nutrition_score: report.nutrition_score,
            daily_calorie_goal: report.daily_calorie_goal,
            deltas,
            current_streak: report.streaks.current_streak,
            best_streak: report.streaks.best_streak,
            level: report.progression.level,
            allergen_alerts: report.allergen_alerts.clone(),
            highlights: highlights(report, config),
        }
    }
}

/// Rule-based observations about a report, most pressing first
pub fn highlights(report: &StatisticsReport, config: &StatsConfig) -> Vec<String> {
    if report.total_days == 0 {
        return vec!["No meals logged in this period yet.".to_string()];
    }

    let mut notes = Vec::new();

    if report.average_sodium_daily > config.sodium_ceiling_mg {
        notes.push(format!(
            "Average sodium of {} mg/day is above the {} mg ceiling.",
            report.average_sodium_daily, config.sodium_ceiling_mg
        ));
    }
    if report.average_fiber_daily < config.fiber_target_g {
        notes.push(format!(
            "Average fiber of {} g/day is below the {} g target.",
            report.average_fiber_daily, config.fiber_target_g
        ));
    }
    if report.missed_meals_alert > 0 {
        notes.push(format!(
            "{} meals short of {} a day over the last {} logged days.",
            report.missed_meals_alert, config.expected_meals_per_day, config.trend_days
        ));
    }
    if report.processed_food_percentage >= 50 {
        notes.push(format!("{}% of meals were processed foods.", report.processed_food_percentage));
    }
    if report.streaks.current_streak > 0 && report.streaks.current_streak == report.streaks.best_streak {
        notes.push(format!(
            "On a personal-best streak of {} days within the calorie goal.",
            report.streaks.current_streak
        ));
    }
    if !report.allergen_alerts.is_empty() {
        notes.push(format!("Allergens logged: {}.", report.allergen_alerts.join(", ")));
    }

    notes
}
