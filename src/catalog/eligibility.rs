//! Dietary eligibility rules.
//!
//! Two policies decide whether a meal suits a diet type:
//!
//! - [`EligibilityPolicy::Substring`] excludes meals whose *name* contains a
//!   forbidden token ("Chicken", "Cheese", ...). Case-sensitive, and it
//!   matches inside words, so "Fishless Tofu" is not vegetarian.
//! - [`EligibilityPolicy::Tagged`] looks meals up in a versioned ingredient
//!   tag table. Meals absent from the table are never eligible for a
//!   restricted diet.
//!
//! In both, vegan eligibility implies vegetarian eligibility, and the
//! non-vegetarian diet accepts everything.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MealCatalog;
use crate::types::DietType;
use crate::{DietPlanError, Result};

/// Forbidden name tokens per restricted diet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionTokens {
    /// Tokens that disqualify a meal for vegetarians (and vegans).
    pub vegetarian: Vec<String>,
    /// Additional tokens that disqualify a meal for vegans.
    pub vegan: Vec<String>,
}

impl Default for ExclusionTokens {
    fn default() -> Self {
        Self {
            vegetarian: vec!["Chicken".into(), "Fish".into(), "Eggs".into()],
            vegan: vec!["Cheese".into(), "Milk".into(), "Yogurt".into()],
        }
    }
}

impl ExclusionTokens {
    fn allows(&self, diet: DietType, meal: &str) -> bool {
        let contains_any = |tokens: &[String]| tokens.iter().any(|t| meal.contains(t.as_str()));
        match diet {
            DietType::NonVegetarian => true,
            DietType::Vegetarian => !contains_any(&self.vegetarian),
            DietType::Vegan => !contains_any(&self.vegetarian) && !contains_any(&self.vegan),
        }
    }
}

/// Ingredient classes relevant to diet rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientTag {
    Poultry,
    Meat,
    Fish,
    Egg,
    Dairy,
}

impl IngredientTag {
    /// Whether a meal carrying this tag is off-limits for `diet`.
    pub const fn excluded_by(self, diet: DietType) -> bool {
        match diet {
            DietType::NonVegetarian => false,
            DietType::Vegetarian => !matches!(self, Self::Dairy),
            DietType::Vegan => true,
        }
    }
}

/// Versioned meal → ingredient tag mapping.
///
/// Stored as JSON: `{"version": 1, "meals": {"Tofu Stir Fry": [], "Cheese Omelette": ["egg", "dairy"]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTable {
    pub version: u32,
    pub meals: HashMap<String, BTreeSet<IngredientTag>>,
}

impl TagTable {
    /// Load a tag table; failures are [`DietPlanError::AssetUnavailable`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DietPlanError::asset("tag table", format!("{}: {e}", path.display())))?;
        let table: Self = serde_json::from_str(&content)
            .map_err(|e| DietPlanError::asset("tag table", format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), version = table.version, meals = table.meals.len(), "loaded tag table");
        Ok(table)
    }

    /// Tags for a meal, or `None` if the table does not know it.
    pub fn tags(&self, meal: &str) -> Option<&BTreeSet<IngredientTag>> {
        self.meals.get(meal)
    }

    fn allows(&self, diet: DietType, meal: &str) -> bool {
        if diet == DietType::NonVegetarian {
            return true;
        }
        match self.tags(meal) {
            Some(tags) => !tags.iter().any(|t| t.excluded_by(diet)),
            None => false,
        }
    }
}

/// Rule used to decide diet eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityPolicy {
    Substring(ExclusionTokens),
    Tagged(TagTable),
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::Substring(ExclusionTokens::default())
    }
}

impl EligibilityPolicy {
    /// Whether `meal` may be served to someone on `diet`.
    pub fn allows(&self, diet: DietType, meal: &str) -> bool {
        match self {
            Self::Substring(tokens) => tokens.allows(diet, meal),
            Self::Tagged(table) => table.allows(diet, meal),
        }
    }
}

/// Eligible meals per diet type, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleSets {
    all: Vec<String>,
    vegetarian: Vec<String>,
    vegan: Vec<String>,
}

impl EligibleSets {
    /// Partition the catalog under `policy`.
    pub fn compute(catalog: &MealCatalog, policy: &EligibilityPolicy) -> Self {
        let filter = |diet: DietType| -> Vec<String> {
            catalog
                .iter()
                .filter(|meal| policy.allows(diet, meal))
                .map(str::to_string)
                .collect()
        };
        Self {
            all: filter(DietType::NonVegetarian),
            vegetarian: filter(DietType::Vegetarian),
            vegan: filter(DietType::Vegan),
        }
    }

    /// Eligible meals for `diet`, possibly empty.
    pub fn for_diet(&self, diet: DietType) -> &[String] {
        match diet {
            DietType::NonVegetarian => &self.all,
            DietType::Vegetarian => &self.vegetarian,
            DietType::Vegan => &self.vegan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MealCatalog {
        MealCatalog::new([
            "Grilled Chicken Salad",
            "Tofu Stir Fry",
            "Cheese Omelette",
            "Lentil Soup",
            "Greek Yogurt Bowl",
            "Scrambled Eggs",
        ])
        .unwrap()
    }

    #[test]
    fn substring_sets_follow_token_lists() {
        let sets = EligibleSets::compute(&catalog(), &EligibilityPolicy::default());
        assert_eq!(sets.for_diet(DietType::NonVegetarian).len(), 6);
        assert_eq!(
            sets.for_diet(DietType::Vegetarian),
            &[
                "Tofu Stir Fry",
                "Cheese Omelette",
                "Lentil Soup",
                "Greek Yogurt Bowl"
            ]
        );
        assert_eq!(
            sets.for_diet(DietType::Vegan),
            &["Tofu Stir Fry", "Lentil Soup"]
        );
    }

    #[test]
    fn vegan_is_subset_of_vegetarian() {
        let sets = EligibleSets::compute(&catalog(), &EligibilityPolicy::default());
        let vegetarian = sets.for_diet(DietType::Vegetarian);
        assert!(
            sets.for_diet(DietType::Vegan)
                .iter()
                .all(|m| vegetarian.contains(m))
        );
    }

    #[test]
    fn substring_matches_inside_words() {
        let policy = EligibilityPolicy::default();
        assert!(!policy.allows(DietType::Vegetarian, "Fishless Tofu"));
        // matching is case-sensitive
        assert!(policy.allows(DietType::Vegetarian, "chicken-free chili"));
    }

    #[test]
    fn tagged_policy_uses_table() {
        let table: TagTable = serde_json::from_str(
            r#"{
                "version": 2,
                "meals": {
                    "Fishless Tofu": [],
                    "Cheese Omelette": ["egg", "dairy"],
                    "Paneer Tikka": ["dairy"],
                    "Grilled Chicken Salad": ["poultry"]
                }
            }"#,
        )
        .unwrap();
        let policy = EligibilityPolicy::Tagged(table);

        assert!(policy.allows(DietType::Vegan, "Fishless Tofu"));
        assert!(policy.allows(DietType::Vegetarian, "Paneer Tikka"));
        assert!(!policy.allows(DietType::Vegan, "Paneer Tikka"));
        assert!(!policy.allows(DietType::Vegetarian, "Cheese Omelette"));
        assert!(!policy.allows(DietType::Vegetarian, "Grilled Chicken Salad"));
        assert!(policy.allows(DietType::NonVegetarian, "Grilled Chicken Salad"));
    }

    #[test]
    fn untagged_meals_are_not_eligible_for_restricted_diets() {
        let policy = EligibilityPolicy::Tagged(TagTable::default());
        assert!(!policy.allows(DietType::Vegetarian, "Lentil Soup"));
        assert!(!policy.allows(DietType::Vegan, "Lentil Soup"));
        assert!(policy.allows(DietType::NonVegetarian, "Lentil Soup"));
    }

    #[test]
    fn custom_tokens_replace_defaults() {
        let policy = EligibilityPolicy::Substring(ExclusionTokens {
            vegetarian: vec!["Beef".into()],
            vegan: vec!["Honey".into()],
        });
        assert!(policy.allows(DietType::Vegetarian, "Grilled Chicken Salad"));
        assert!(!policy.allows(DietType::Vegetarian, "Beef Stew"));
        assert!(!policy.allows(DietType::Vegan, "Honey Oats"));
        assert!(policy.allows(DietType::Vegetarian, "Honey Oats"));
    }
}
