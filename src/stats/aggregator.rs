//! Daily aggregation
//!
//! Turns day buckets into `DailyTotals`.

use chrono::{NaiveDate, Timelike};

use super::bucketer::DayBuckets;
use super::config::StatsConfig;
use crate::models::{Categorical, DailyTotals, MealRecord, Nutrients};

/// Most frequent value, ties going to the earlier declared variant
pub fn dominant<T, I>(values: I) -> Option<T>
where
    T: Categorical,
    I: IntoIterator<Item = T>,
{
    let mut counts = vec![0u32; T::VARIANTS.len()];
    for value in values {
        counts[value.ordinal()] += 1;
    }

    let mut best: Option<(usize, u32)> = None;
    for (idx, &count) in counts.iter().enumerate() {
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((idx, count));
        }
    }
    best.map(|(idx, _)| T::VARIANTS[idx])
}

/// Sum one day's meals
pub fn aggregate_day(date: NaiveDate, meals: &[&MealRecord], config: &StatsConfig) -> DailyTotals {
    let nutrients: Nutrients = meals.iter().map(|m| m.nutrients()).sum();
    let meal_count = meals.len() as u32;

    let quality_sum: u32 = meals
        .iter()
        .map(|m| u32::from(m.effective_quality(config.default_meal_quality)))
        .sum();
    let mean_quality = if meal_count > 0 {
        f64::from(quality_sum) / f64::from(meal_count)
    } else {
        0.0
    };

    let hours = meals.iter().map(|m| m.timestamp.hour());

    DailyTotals {
        date,
        nutrients,
        meal_count,
        processed_meal_count: meals.iter().filter(|m| m.is_processed()).count() as u32,
        plant_meal_count: meals
            .iter()
            .filter(|m| m.mentions_any(&config.plant_keywords))
            .count() as u32,
        mean_quality,
        first_meal_hour: hours.clone().min().unwrap_or(config.default_eating_start_hour),
        last_meal_hour: hours.max().unwrap_or(config.default_eating_end_hour),
        mood: dominant(meals.iter().filter_map(|m| m.mood)),
        energy: dominant(meals.iter().filter_map(|m| m.energy)),
        satiety: dominant(meals.iter().filter_map(|m| m.satiety)),
    }
}

/// One `DailyTotals` per bucket, ascending by date
pub fn aggregate_daily(buckets: &DayBuckets<'_>, config: &StatsConfig) -> Vec<DailyTotals> {
    buckets
        .iter()
        .map(|(date, meals)| aggregate_day(*date, meals, config))
        .collect()
}
