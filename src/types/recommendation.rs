//! Resolver output and the per-request meal plan.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::health::HealthSummary;
use super::profile::{DietType, MacroPreference};

/// How a recommendation slot was filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MealOrigin {
    /// The classifier's pick was already eligible.
    Kept,
    /// The pick was ineligible and replaced by a random eligible meal.
    Substituted { predicted: String },
    /// The pick was ineligible and nothing was eligible to replace it.
    Placeholder { predicted: String },
}

/// One slot of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedMeal {
    /// 1-based position, matching the classifier's rank.
    pub rank: usize,
    pub name: String,
    pub origin: MealOrigin,
}

/// Ordered, diet-compliant meal names for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub diet: DietType,
    pub meals: Vec<RecommendedMeal>,
}

impl Recommendation {
    pub fn names(&self) -> Vec<&str> {
        self.meals.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Number of slots replaced by a random eligible meal.
    pub fn substitutions(&self) -> usize {
        self.meals
            .iter()
            .filter(|m| matches!(m.origin, MealOrigin::Substituted { .. }))
            .count()
    }

    /// Number of slots filled with the diet placeholder.
    pub fn placeholders(&self) -> usize {
        self.meals
            .iter()
            .filter(|m| matches!(m.origin, MealOrigin::Placeholder { .. }))
            .count()
    }
}

/// Everything shown back to the user for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub health: HealthSummary,
    pub macro_preference: MacroPreference,
    pub recommendation: Recommendation,
}

impl MealPlan {
    pub fn diet(&self) -> DietType {
        self.recommendation.diet
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for meal in &self.recommendation.meals {
            writeln!(f, "Option {}: {}", meal.rank, meal.name)?;
            writeln!(
                f,
                "  Macro Focus: {} | Diet Type: {}",
                self.macro_preference,
                self.diet()
            )?;
        }
        Ok(())
    }
}
