//! Calorie-goal streaks
//!
//! A day keeps the streak alive when its calories sit inside the streak
//! band (looser than the achievement band).

use serde::{Deserialize, Serialize};

use super::config::StatsConfig;
use crate::models::DailyTotals;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    #[serde(rename = "currentStreak")]
    pub current_streak: u32,
    #[serde(rename = "bestStreak")]
    pub best_streak: u32,
}

/// Current and best streak over a chronological day sequence, in one
/// pass from the most recent day backwards
pub fn compute_streaks(days: &[DailyTotals], goal: f64, config: &StatsConfig) -> StreakStats {
    let band = config.streak_band;
    let mut stats = StreakStats::default();
    let mut run = 0u32;
    let mut still_current = true;

    for day in days.iter().rev() {
        if day.calories_within(goal, band.low, band.high) {
            run += 1;
            stats.best_streak = stats.best_streak.max(run);
            if still_current {
                stats.current_streak = run;
            }
        } else {
            run = 0;
            still_current = false;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;
    use chrono::{Duration, NaiveDate};

    fn days_with_calories(calories: &[f64]) -> Vec<DailyTotals> {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        calories
            .iter()
            .enumerate()
            .map(|(i, &c)| DailyTotals {
                date: start + Duration::days(i as i64),
                nutrients: Nutrients { calories: c, ..Default::default() },
                meal_count: 3,
                processed_meal_count: 0,
                plant_meal_count: 0,
                mean_quality: 5.0,
                first_meal_hour: 8,
                last_meal_hour: 20,
                mood: None,
                energy: None,
                satiety: None,
            })
            .collect()
    }

    #[test]
    fn test_streak_scenario() {
        let config = StatsConfig::default();
        let days = days_with_calories(&[2100.0, 1900.0, 2500.0, 2000.0]);
        let stats = compute_streaks(&days, 2000.0, &config);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn test_most_recent_day_missed() {
        let config = StatsConfig::default();
        let days = days_with_calories(&[2000.0, 2000.0, 2000.0, 900.0]);
        let stats = compute_streaks(&days, 2000.0, &config);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 3);
    }

    #[test]
    fn test_band_edges_inclusive() {
        let config = StatsConfig::default();
        let days = days_with_calories(&[1600.0, 2400.0]);
        let stats = compute_streaks(&days, 2000.0, &config);
        assert_eq!(stats, StreakStats { current_streak: 2, best_streak: 2 });
    }

    #[test]
    fn test_empty() {
        let config = StatsConfig::default();
        assert_eq!(compute_streaks(&[], 2000.0, &config), StreakStats::default());
    }
}
