//! Period summaries
//!
//! Reduces a chronological `DailyTotals` sequence to period averages,
//! percentage signals, trend arrays, eating-window figures and the
//! composite nutrition score.
//!
//! Averages divide by the number of days that have at least one meal,
//! never by the nominal window length.

use serde::{Deserialize, Serialize};

use super::config::StatsConfig;
use crate::models::{DailyTotals, Nutrients};

// Nutrition score: five independently capped terms
const SCORE_ACHIEVEMENT_WEIGHT: f64 = 0.25;
const SCORE_ACHIEVEMENT_CAP: f64 = 25.0;
const SCORE_PROCESSED_BASE: f64 = 25.0;
const SCORE_PROCESSED_PENALTY: f64 = 0.5;
const SCORE_LOGGING_WEIGHT: f64 = 0.20;
const SCORE_LOGGING_CAP: f64 = 20.0;
const SCORE_FIBER_CAP: f64 = 15.0;
const SCORE_SODIUM_BASE: f64 = 15.0;
/// Milligrams over the ceiling that cost one point
const SCORE_SODIUM_STEP_MG: f64 = 100.0;

/// Last few days of data, one array per macro, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrends {
    pub calories: Vec<f64>,
    pub protein: Vec<f64>,
    pub carbs: Vec<f64>,
    pub fats: Vec<f64>,
}

/// Earliest and latest meal times, formatted "HH:00"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EatingHours {
    pub start: String,
    pub end: String,
}

impl EatingHours {
    pub fn from_hours(start: u32, end: u32) -> Self {
        Self {
            start: format!("{:02}:00", start),
            end: format!("{:02}:00", end),
        }
    }
}

/// Inputs to the composite nutrition score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    pub achievement_percent: f64,
    pub processed_percent: f64,
    pub full_logging_percent: f64,
    pub average_fiber: f64,
    pub average_sodium: f64,
}

/// Everything the summarizer derives for one period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub total_days: u32,
    pub total_meals: u32,
    /// Unrounded per-day averages
    pub averages: Nutrients,
    pub calorie_goal_achievement_percent: f64,
    pub processed_food_percentage: f64,
    pub full_logging_percentage: f64,
    pub vegetable_fruit_intake: f64,
    pub nutrition_score: u32,
    pub weekly_trends: WeeklyTrends,
    pub eating_start_hour: u32,
    pub eating_end_hour: u32,
    pub intermittent_fasting_hours: u32,
    pub missed_meals_alert: u32,
}

impl PeriodSummary {
    /// Summary of a period without any logged meals. Eating hours fall
    /// back to the configured defaults; every number is zero.
    pub fn empty(config: &StatsConfig) -> Self {
        Self {
            total_days: 0,
            total_meals: 0,
            averages: Nutrients::zero(),
            calorie_goal_achievement_percent: 0.0,
            processed_food_percentage: 0.0,
            full_logging_percentage: 0.0,
            vegetable_fruit_intake: 0.0,
            nutrition_score: 0,
            weekly_trends: WeeklyTrends::default(),
            eating_start_hour: config.default_eating_start_hour,
            eating_end_hour: config.default_eating_end_hour,
            intermittent_fasting_hours: 0,
            missed_meals_alert: 0,
        }
    }
}

/// Per-day averages over days with data; zero when there are none
pub fn period_averages(days: &[DailyTotals]) -> Nutrients {
    if days.is_empty() {
        return Nutrients::zero();
    }
    let total: Nutrients = days.iter().map(|d| d.nutrients).sum();
    total.scale(1.0 / days.len() as f64)
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn percent_of_days<F>(days: &[DailyTotals], predicate: F) -> f64
where
    F: Fn(&DailyTotals) -> bool,
{
    percent(days.iter().filter(|&d| predicate(d)).count(), days.len())
}

fn total_meals(days: &[DailyTotals]) -> u32 {
    days.iter().map(|d| d.meal_count).sum()
}

/// Share of days whose calories sit in the achievement band
pub fn calorie_goal_achievement_percent(days: &[DailyTotals], goal: f64, config: &StatsConfig) -> f64 {
    let band = config.achievement_band;
    percent_of_days(days, |d| d.calories_within(goal, band.low, band.high))
}

/// Share of meals (not days) flagged processed or highly processed
pub fn processed_food_percentage(days: &[DailyTotals]) -> f64 {
    let processed: u32 = days.iter().map(|d| d.processed_meal_count).sum();
    percent(processed as usize, total_meals(days) as usize)
}

pub fn full_logging_percentage(days: &[DailyTotals], config: &StatsConfig) -> f64 {
    percent_of_days(days, |d| d.meal_count >= config.full_logging_meals)
}

/// Share of meals whose description names a vegetable or fruit.
/// Keyword matching only, so treat it as a rough signal.
pub fn vegetable_fruit_intake(days: &[DailyTotals]) -> f64 {
    let plant: u32 = days.iter().map(|d| d.plant_meal_count).sum();
    percent(plant as usize, total_meals(days) as usize)
}

/// Composite 0-100 score. Each term is capped or floored on its own
/// before the sum is clamped.
pub fn nutrition_score(inputs: &ScoreInputs, config: &StatsConfig) -> u32 {
    let achievement = (inputs.achievement_percent * SCORE_ACHIEVEMENT_WEIGHT).min(SCORE_ACHIEVEMENT_CAP);
    let processed = (SCORE_PROCESSED_BASE - inputs.processed_percent * SCORE_PROCESSED_PENALTY).max(0.0);
    let logging = (inputs.full_logging_percent * SCORE_LOGGING_WEIGHT).min(SCORE_LOGGING_CAP);

    let fiber = if config.fiber_target_g > 0.0 {
        (inputs.average_fiber / config.fiber_target_g * SCORE_FIBER_CAP).min(SCORE_FIBER_CAP)
    } else {
        SCORE_FIBER_CAP
    };

    let sodium_excess = ((inputs.average_sodium - config.sodium_ceiling_mg) / SCORE_SODIUM_STEP_MG).max(0.0);
    let sodium = (SCORE_SODIUM_BASE - sodium_excess).max(0.0);

    let total = achievement + processed + logging + fiber.max(0.0) + sodium;
    total.clamp(0.0, 100.0).round() as u32
}

/// The most recent `trend_days` days projected per macro, oldest first
pub fn weekly_trends(days: &[DailyTotals], config: &StatsConfig) -> WeeklyTrends {
    let recent = last_days(days, config.trend_days);
    WeeklyTrends {
        calories: recent.iter().map(|d| d.nutrients.calories).collect(),
        protein: recent.iter().map(|d| d.nutrients.protein).collect(),
        carbs: recent.iter().map(|d| d.nutrients.carbs).collect(),
        fats: recent.iter().map(|d| d.nutrients.fats).collect(),
    }
}

fn last_days(days: &[DailyTotals], n: usize) -> &[DailyTotals] {
    &days[days.len().saturating_sub(n)..]
}

/// Earliest and latest meal hour across the period
pub fn eating_window(days: &[DailyTotals], config: &StatsConfig) -> (u32, u32) {
    let start = days.iter().map(|d| d.first_meal_hour).min();
    let end = days.iter().map(|d| d.last_meal_hour).max();
    match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => (config.default_eating_start_hour, config.default_eating_end_hour),
    }
}

pub fn fasting_hours(start: u32, end: u32) -> u32 {
    24u32.saturating_sub(end.saturating_sub(start))
}

/// Meals short of the expected count over the most recent days with data
pub fn missed_meals(days: &[DailyTotals], config: &StatsConfig) -> u32 {
    let expected = config.expected_meals_per_day * config.trend_days as u32;
    expected.saturating_sub(total_meals(last_days(days, config.trend_days)))
}

/// Summarize a chronological sequence of days
pub fn summarize(days: &[DailyTotals], goal: f64, config: &StatsConfig) -> PeriodSummary {
    if days.is_empty() {
        return PeriodSummary::empty(config);
    }

    let averages = period_averages(days);
    let achievement = calorie_goal_achievement_percent(days, goal, config);
    let processed = processed_food_percentage(days);
    let full_logging = full_logging_percentage(days, config);

    let score = nutrition_score(
        &ScoreInputs {
            achievement_percent: achievement,
            processed_percent: processed,
            full_logging_percent: full_logging,
            average_fiber: averages.fiber,
            average_sodium: averages.sodium,
        },
        config,
    );

    let (start, end) = eating_window(days, config);

    PeriodSummary {
        total_days: days.len() as u32,
        total_meals: total_meals(days),
        averages,
        calorie_goal_achievement_percent: achievement,
        processed_food_percentage: processed,
        full_logging_percentage: full_logging,
        vegetable_fruit_intake: vegetable_fruit_intake(days),
        nutrition_score: score,
        weekly_trends: weekly_trends(days, config),
        eating_start_hour: start,
        eating_end_hour: end,
        intermittent_fasting_hours: fasting_hours(start, end),
        missed_meals_alert: missed_meals(days, config),
    }
}
