//! Shared nutrient vector
//!
//! Used by meal records, daily totals, and period averages.

use serde::{Deserialize, Serialize};

/// Summable nutrient quantities
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,   // grams
    pub carbs: f64,     // grams
    pub fats: f64,      // grams
    pub fiber: f64,     // grams
    pub sugar: f64,     // grams
    pub sodium: f64,    // milligrams
    pub liquids: f64,   // milliliters
    pub alcohol: f64,   // grams
    pub caffeine: f64,  // milligrams
}

impl Nutrients {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every quantity by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fats: self.fats * multiplier,
            fiber: self.fiber * multiplier,
            sugar: self.sugar * multiplier,
            sodium: self.sodium * multiplier,
            liquids: self.liquids * multiplier,
            alcohol: self.alcohol * multiplier,
            caffeine: self.caffeine * multiplier,
        }
    }

    pub fn add(&self, other: &Nutrients) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
            fiber: self.fiber + other.fiber,
            sugar: self.sugar + other.sugar,
            sodium: self.sodium + other.sodium,
            liquids: self.liquids + other.liquids,
            alcohol: self.alcohol + other.alcohol,
            caffeine: self.caffeine + other.caffeine,
        }
    }

    /// Round every quantity to the nearest integer
    pub fn rounded(&self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: self.protein.round(),
            carbs: self.carbs.round(),
            fats: self.fats.round(),
            fiber: self.fiber.round(),
            sugar: self.sugar.round(),
            sodium: self.sodium.round(),
            liquids: self.liquids.round(),
            alcohol: self.alcohol.round(),
            caffeine: self.caffeine.round(),
        }
    }
}

impl std::ops::Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, multiplier: f64) -> Nutrients {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_scale() {
        let a = Nutrients { calories: 500.0, protein: 30.0, sodium: 800.0, ..Default::default() };
        let b = Nutrients { calories: 700.0, protein: 10.0, liquids: 250.0, ..Default::default() };

        let total: Nutrients = vec![a, b].into_iter().sum();
        assert_eq!(total.calories, 1200.0);
        assert_eq!(total.protein, 40.0);
        assert_eq!(total.sodium, 800.0);
        assert_eq!(total.liquids, 250.0);

        let half = total * 0.5;
        assert_eq!(half.calories, 600.0);
        assert_eq!(half.liquids, 125.0);
    }

    #[test]
    fn test_rounded() {
        let n = Nutrients { calories: 1999.5, fiber: 12.4, ..Default::default() };
        let r = n.rounded();
        assert_eq!(r.calories, 2000.0);
        assert_eq!(r.fiber, 12.0);
    }
}
