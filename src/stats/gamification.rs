//! XP and levels
//!
//! Every meal earns XP by its quality rating; XP accumulates into levels.

use serde::{Deserialize, Serialize};

use super::config::StatsConfig;
use crate::models::MealRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    #[serde(rename = "totalPoints")]
    pub total_points: u64,
    /// Starts at 1 and has no upper bound
    pub level: u64,
    /// XP earned within the current level
    #[serde(rename = "currentXP")]
    pub current_xp: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            total_points: 0,
            level: 1,
            current_xp: 0,
        }
    }
}

impl Progression {
    pub fn from_points(total_points: u64, config: &StatsConfig) -> Self {
        let per_level = config.xp_per_level.max(1);
        Self {
            total_points,
            level: total_points / per_level + 1,
            current_xp: total_points % per_level,
        }
    }
}

/// XP for a quality rating, using the first tier that covers it. Tiers
/// are ascending by `max_quality` (`StatsConfig::from_json_str` sorts them).
pub fn xp_for_quality(quality: u8, config: &StatsConfig) -> u32 {
    config
        .xp_tiers
        .iter()
        .find(|tier| quality <= tier.max_quality)
        .or_else(|| config.xp_tiers.last())
        .map_or(0, |tier| tier.xp)
}

pub fn meal_xp(meal: &MealRecord, config: &StatsConfig) -> u32 {
    xp_for_quality(meal.effective_quality(config.default_meal_quality), config)
}

/// Total XP over every meal, converted to a level
pub fn tally<'a, I>(meals: I, config: &StatsConfig) -> Progression
where
    I: IntoIterator<Item = &'a MealRecord>,
{
    let total: u64 = meals.into_iter().map(|m| u64::from(meal_xp(m, config))).sum();
    Progression::from_points(total, config)
}
