//! Dietplan - diet-compliant meal recommendations from a trained classifier
//!
//! Given a user's measurements and categorical preferences, this crate
//! computes a BMI summary, asks a pre-trained classifier which meals fit
//! the profile, and post-processes the top picks so every recommended meal
//! respects the user's diet type.
//!
//! # Example
//!
//! ```rust
//! use dietplan::{
//!     DietPlanner, DietType, LinearClassifier, MealCatalog, SessionHistory, UserProfile,
//! };
//!
//! fn main() -> dietplan::Result<()> {
//!     let catalog = MealCatalog::new([
//!         "Grilled Chicken Salad",
//!         "Tofu Stir Fry",
//!         "Cheese Omelette",
//!         "Lentil Soup",
//!     ])?;
//!     // bias-only model: always ranks chicken first
//!     let classifier = LinearClassifier::new(vec![vec![0.0; 3]; 4], vec![3.0, 2.0, 1.0, 0.0])?;
//!
//!     let mut planner = DietPlanner::builder()
//!         .catalog(catalog)
//!         .classifier(classifier)
//!         .seed(7)
//!         .build()?;
//!
//!     let profile = UserProfile::new(170.0, 65.0)?.diet(DietType::Vegan);
//!     let mut session = SessionHistory::default();
//!     let plan = planner.recommend(&profile, &mut session)?;
//!
//!     assert_eq!(plan.recommendation.len(), 3);
//!     println!("{}", plan.health);
//!     print!("{plan}");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod planner;
pub mod resolver;
pub mod session;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use cache::{CacheConfig, PredictionCache};
pub use catalog::{EligibilityPolicy, EligibleSets, ExclusionTokens, IngredientTag, MealCatalog, TagTable};
pub use classifier::{FeatureLayout, FeatureVector, LinearClassifier, MealClassifier};
#[cfg(feature = "onnx")]
pub use classifier::OnnxClassifier;
pub use config::Config;
pub use error::{DietPlanError, Result};
pub use planner::{DietPlanner, DietPlannerBuilder};
pub use resolver::{DEFAULT_TOP_K, Placeholders, Resolver, ResolverBuilder};
pub use session::{HistoryMode, SessionHistory};
pub use version::BuildInfo;

// Re-export all types
pub use types::{
    BmiCategory, DietType, Goal, HealthSummary, MacroPreference, MealOrigin, MealPlan,
    MedicalCondition, RankedPrediction, Recommendation, RecommendedMeal, ScoredMeal, UserProfile,
};
