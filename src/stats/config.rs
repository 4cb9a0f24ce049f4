//! Statistics configuration
//!
//! Every threshold, target, and tier the engine uses lives here. The
//! defaults are the product's fixed expectations; a JSON file may
//! override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inclusive band of calories relative to the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieBand {
    pub low: f64,
    pub high: f64,
}

impl CalorieBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Meals rated up to `max_quality` (inclusive) earn `xp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTier {
    pub max_quality: u8,
    pub xp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Band counted by `calorie_goal_achievement_percent`
    pub achievement_band: CalorieBand,
    /// Looser band that keeps a streak alive
    pub streak_band: CalorieBand,
    /// Calorie band required for a balanced-macros day
    pub balanced_band: CalorieBand,

    pub protein_target_g: f64,
    pub carbs_target_g: f64,
    pub fats_target_g: f64,
    /// Fraction of each macro target a balanced day must reach
    pub balanced_macro_floor: f64,

    pub protein_goal_g: f64,
    pub hydration_goal_ml: f64,
    pub fiber_target_g: f64,
    pub sodium_ceiling_mg: f64,
    pub perfect_day_quality: f64,

    pub xp_tiers: Vec<XpTier>,
    pub xp_per_level: u64,
    pub default_meal_quality: u8,

    /// Meals per day that count as a fully logged day
    pub full_logging_meals: u32,
    pub expected_meals_per_day: u32,
    /// Number of most recent days in trend arrays and the missed-meal check
    pub trend_days: usize,

    pub default_eating_start_hour: u32,
    pub default_eating_end_hour: u32,
    pub default_calorie_goal: f64,

    /// Lowercase words marking a meal description as vegetable/fruit
    pub plant_keywords: Vec<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            achievement_band: CalorieBand::new(0.9, 1.1),
            streak_band: CalorieBand::new(0.8, 1.2),
            balanced_band: CalorieBand::new(0.8, 1.2),
            protein_target_g: 120.0,
            carbs_target_g: 200.0,
            fats_target_g: 60.0,
            balanced_macro_floor: 0.8,
            protein_goal_g: 120.0,
            hydration_goal_ml: 2500.0,
            fiber_target_g: 25.0,
            sodium_ceiling_mg: 2300.0,
            perfect_day_quality: 9.0,
            xp_tiers: vec![
                XpTier { max_quality: 3, xp: 50 },
                XpTier { max_quality: 6, xp: 75 },
                XpTier { max_quality: 8, xp: 100 },
                XpTier { max_quality: 10, xp: 150 },
            ],
            xp_per_level: 1000,
            default_meal_quality: 5,
            full_logging_meals: 3,
            expected_meals_per_day: 3,
            trend_days: 7,
            default_eating_start_hour: 8,
            default_eating_end_hour: 20,
            default_calorie_goal: 2000.0,
            plant_keywords: [
                "vegetable", "veggie", "salad", "fruit", "apple", "banana", "orange",
                "berry", "berries", "broccoli", "spinach", "carrot", "tomato", "kale",
                "lettuce", "cucumber", "pepper", "avocado", "grape", "melon", "pear",
                "peach", "mango", "pineapple", "zucchini", "cabbage", "cauliflower",
                "beans", "lentil", "peas",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl StatsConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse overrides from JSON text. XP tiers are sorted by
    /// `max_quality` so they can be listed in any order.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: StatsConfig = serde_json::from_str(raw)?;
        config.xp_tiers.sort_by_key(|tier| tier.max_quality);
        Ok(config)
    }

    /// Macro floors for a balanced day (protein, carbs, fats)
    pub fn balanced_macro_floors(&self) -> (f64, f64, f64) {
        (
            self.protein_target_g * self.balanced_macro_floor,
            self.carbs_target_g * self.balanced_macro_floor,
            self.fats_target_g * self.balanced_macro_floor,
        )
    }

    /// `goal` if it is usable, otherwise the configured default
    pub fn resolve_calorie_goal(&self, goal: Option<f64>) -> f64 {
        match goal {
            Some(g) if g.is_finite() && g > 0.0 => g,
            _ => self.default_calorie_goal,
        }
    }
}
