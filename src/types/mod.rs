//! Public types for the Dietplan API.

mod health;
mod prediction;
mod profile;
mod recommendation;

pub use health::{BmiCategory, Goal, HealthSummary, bmi};
pub use prediction::{RankedPrediction, ScoredMeal};
pub use profile::{
    DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, DietType, HEIGHT_RANGE_CM, MacroPreference,
    MedicalCondition, UserProfile, WEIGHT_RANGE_KG,
};
pub use recommendation::{MealOrigin, MealPlan, Recommendation, RecommendedMeal};
