//! Previous-period baselines
//!
//! Re-runs bucketing, aggregation and averaging over the window before the
//! requested one. Only raw averages are produced; score, streaks and XP
//! are not recomputed for the previous period.

use serde::{Deserialize, Serialize};

use super::aggregator::aggregate_daily;
use super::bucketer::bucket_by_day;
use super::config::StatsConfig;
use super::summarizer::period_averages;
use crate::models::MealRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviousPeriod {
    pub previous_calories_daily: f64,
    pub previous_protein_daily: f64,
    pub previous_carbs_daily: f64,
    pub previous_fats_daily: f64,
    pub previous_fiber_daily: f64,
    pub previous_sugar_daily: f64,
    pub previous_sodium_daily: f64,
    pub previous_liquids_daily: f64,
    pub previous_alcohol_daily: f64,
    pub previous_caffeine_daily: f64,
}

/// Rounded per-day averages of the previous window's meals
pub fn previous_period<'a, I>(meals: I, config: &StatsConfig) -> PreviousPeriod
where
    I: IntoIterator<Item = &'a MealRecord>,
{
    let days = aggregate_daily(&bucket_by_day(meals), config);
    let avg = period_averages(&days).rounded();

    PreviousPeriod {
        previous_calories_daily: avg.calories,
        previous_protein_daily: avg.protein,
        previous_carbs_daily: avg.carbs,
        previous_fats_daily: avg.fats,
        previous_fiber_daily: avg.fiber,
        previous_sugar_daily: avg.sugar,
        previous_sodium_daily: avg.sodium,
        previous_liquids_daily: avg.liquids,
        previous_alcohol_daily: avg.alcohol,
        previous_caffeine_daily: avg.caffeine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_previous_averages_over_logged_days() {
        let config = StatsConfig::default();
        let meal = |day: u32, calories: f64| MealRecord {
            calories,
            sodium_mg: 1000.0,
            ..MealRecord::at(Utc.with_ymd_and_hms(2025, 2, day, 12, 0, 0).unwrap())
        };
        let meals = vec![meal(1, 1000.0), meal(1, 900.0), meal(5, 1600.5)];

        let previous = previous_period(&meals, &config);
        assert_eq!(previous.previous_calories_daily, 1750.0);
        assert_eq!(previous.previous_sodium_daily, 1500.0);
        assert_eq!(previous.previous_protein_daily, 0.0);
    }

    #[test]
    fn test_no_previous_meals() {
        let config = StatsConfig::default();
        assert_eq!(previous_period(&Vec::<MealRecord>::new(), &config), PreviousPeriod::default());
    }
}
