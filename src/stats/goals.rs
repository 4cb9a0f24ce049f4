//! Goal achievement day counts
//!
//! Macro targets here are the fixed product targets, not the user's own
//! questionnaire-derived targets.

use serde::{Deserialize, Serialize};

use super::config::StatsConfig;
use crate::models::DailyTotals;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAchievements {
    pub protein_goal_days: u32,
    pub hydration_goal_days: u32,
    pub balanced_meal_days: u32,
    pub fiber_goal_days: u32,
    pub perfect_days: u32,
    /// Protein goal days capped at a week
    pub weekly_streak: u32,
}

pub fn is_balanced_day(day: &DailyTotals, goal: f64, config: &StatsConfig) -> bool {
    let band = config.balanced_band;
    let (protein_floor, carbs_floor, fats_floor) = config.balanced_macro_floors();
    day.calories_within(goal, band.low, band.high)
        && day.nutrients.protein >= protein_floor
        && day.nutrients.carbs >= carbs_floor
        && day.nutrients.fats >= fats_floor
}

fn count_days<F>(days: &[DailyTotals], predicate: F) -> u32
where
    F: Fn(&DailyTotals) -> bool,
{
    days.iter().filter(|&d| predicate(d)).count() as u32
}

/// Count the days meeting each goal
pub fn count_goal_days(days: &[DailyTotals], goal: f64, config: &StatsConfig) -> GoalAchievements {
    let protein_goal_days = count_days(days, |d| d.nutrients.protein >= config.protein_goal_g);

    GoalAchievements {
        protein_goal_days,
        hydration_goal_days: count_days(days, |d| d.nutrients.liquids >= config.hydration_goal_ml),
        balanced_meal_days: count_days(days, |d| is_balanced_day(d, goal, config)),
        fiber_goal_days: count_days(days, |d| d.nutrients.fiber >= config.fiber_target_g),
        perfect_days: count_days(days, |d| d.mean_quality >= config.perfect_day_quality),
        weekly_streak: protein_goal_days.min(7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;
    use chrono::NaiveDate;

    fn day(nutrients: Nutrients, mean_quality: f64) -> DailyTotals {
        DailyTotals {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            nutrients,
            meal_count: 3,
            processed_meal_count: 0,
            plant_meal_count: 0,
            mean_quality,
            first_meal_hour: 8,
            last_meal_hour: 20,
            mood: None,
            energy: None,
            satiety: None,
        }
    }

    #[test]
    fn test_each_goal_counted_independently() {
        let config = StatsConfig::default();
        let days = vec![
            day(Nutrients { protein: 130.0, liquids: 2600.0, ..Default::default() }, 9.0),
            day(Nutrients { protein: 119.9, fiber: 30.0, ..Default::default() }, 8.9),
            day(Nutrients { calories: 2000.0, protein: 97.0, carbs: 161.0, fats: 49.0, ..Default::default() }, 5.0),
        ];

        let goals = count_goal_days(&days, 2000.0, &config);
        assert_eq!(goals.protein_goal_days, 1);
        assert_eq!(goals.hydration_goal_days, 1);
        assert_eq!(goals.fiber_goal_days, 1);
        assert_eq!(goals.perfect_days, 1);
        assert_eq!(goals.balanced_meal_days, 1);
        assert_eq!(goals.weekly_streak, 1);
    }

    #[test]
    fn test_balanced_requires_every_macro() {
        let config = StatsConfig::default();
        let almost = day(
            Nutrients { calories: 2000.0, protein: 150.0, carbs: 250.0, fats: 47.9, ..Default::default() },
            5.0,
        );
        assert!(!is_balanced_day(&almost, 2000.0, &config));

        let off_band = day(
            Nutrients { calories: 2500.0, protein: 150.0, carbs: 250.0, fats: 70.0, ..Default::default() },
            5.0,
        );
        assert!(!is_balanced_day(&off_band, 2000.0, &config));
    }

    #[test]
    fn test_weekly_streak_caps_at_seven() {
        let config = StatsConfig::default();
        let days: Vec<DailyTotals> = (0..10)
            .map(|_| day(Nutrients { protein: 150.0, ..Default::default() }, 5.0))
            .collect();
        let goals = count_goal_days(&days, 2000.0, &config);
        assert_eq!(goals.protein_goal_days, 10);
        assert_eq!(goals.weekly_streak, 7);
    }
}
