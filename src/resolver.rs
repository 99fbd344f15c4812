//! Recommendation resolver.
//!
//! Turns a ranked classifier prediction into a diet-compliant list of meal
//! names. For each of the top `k` candidates, in rank order:
//!
//! 1. an eligible candidate is kept as is;
//! 2. an ineligible one is replaced by a meal drawn uniformly at random
//!    from the diet's eligible set (slots are drawn independently, so the
//!    same meal may fill more than one slot);
//! 3. if the eligible set is empty, the diet's placeholder is used instead.
//!
//! Output order always follows input rank; substitution never re-sorts.
//! The resolver holds no mutable state; randomness comes from the caller's
//! RNG so results are reproducible under a seeded generator.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::catalog::{EligibilityPolicy, EligibleSets, MealCatalog};
use crate::types::{DietType, MealOrigin, RankedPrediction, Recommendation, RecommendedMeal};
use crate::{DietPlanError, Result};

/// Number of meals recommended per request unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// Fallback meal names used when a diet has no eligible meals at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholders {
    #[serde(default = "default_vegetarian_placeholder")]
    pub vegetarian: String,
    #[serde(default = "default_vegan_placeholder")]
    pub vegan: String,
}

fn default_vegetarian_placeholder() -> String {
    "Vegetarian Plate".to_string()
}

fn default_vegan_placeholder() -> String {
    "Vegan Bowl".to_string()
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            vegetarian: default_vegetarian_placeholder(),
            vegan: default_vegan_placeholder(),
        }
    }
}

impl Placeholders {
    /// Placeholder for a restricted diet. The non-vegetarian diet accepts
    /// every meal and never needs one.
    pub fn for_diet(&self, diet: DietType) -> Option<&str> {
        match diet {
            DietType::Vegetarian => Some(self.vegetarian.as_str()),
            DietType::Vegan => Some(self.vegan.as_str()),
            DietType::NonVegetarian => None,
        }
    }
}

/// Builder for [`Resolver`].
pub struct ResolverBuilder<'a> {
    catalog: &'a MealCatalog,
    policy: EligibilityPolicy,
    placeholders: Placeholders,
    top_k: usize,
}

impl<'a> ResolverBuilder<'a> {
    fn new(catalog: &'a MealCatalog) -> Self {
        Self {
            catalog,
            policy: EligibilityPolicy::default(),
            placeholders: Placeholders::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the eligibility rule (default: substring tokens).
    pub fn policy(mut self, policy: EligibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the placeholder names.
    pub fn placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Set how many meals to recommend (default: 3).
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Validate `k` against the catalog and precompute eligible sets.
    pub fn build(self) -> Result<Resolver> {
        check_k(self.top_k, self.catalog.len())?;
        let eligible = EligibleSets::compute(self.catalog, &self.policy);
        Ok(Resolver {
            policy: self.policy,
            eligible,
            placeholders: self.placeholders,
            top_k: self.top_k,
            catalog_len: self.catalog.len(),
        })
    }
}

fn check_k(k: usize, available: usize) -> Result<()> {
    if k == 0 {
        return Err(DietPlanError::InvalidInput(
            "top_k must be at least 1".to_string(),
        ));
    }
    if k > available {
        return Err(DietPlanError::InsufficientClasses {
            requested: k,
            available,
        });
    }
    Ok(())
}

/// Diet-aware post-processor for classifier rankings.
#[derive(Debug, Clone)]
pub struct Resolver {
    policy: EligibilityPolicy,
    eligible: EligibleSets,
    placeholders: Placeholders,
    top_k: usize,
    catalog_len: usize,
}

impl Resolver {
    /// Start building a resolver over `catalog`.
    pub fn builder(catalog: &MealCatalog) -> ResolverBuilder<'_> {
        ResolverBuilder::new(catalog)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Eligible meals for `diet`, in catalog order.
    pub fn eligible(&self, diet: DietType) -> &[String] {
        self.eligible.for_diet(diet)
    }

    /// Resolve with the configured `k`.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        ranked: &RankedPrediction,
        diet: DietType,
        rng: &mut R,
    ) -> Result<Recommendation> {
        self.resolve_top(ranked, diet, self.top_k, rng)
    }

    /// Resolve the first `k` candidates of `ranked` for `diet`.
    ///
    /// Returns exactly `min(k, ranked.len())` meals. Fails with
    /// [`DietPlanError::EmptyPrediction`] on an empty ranking and
    /// [`DietPlanError::InsufficientClasses`] when `k` exceeds the catalog.
    /// An empty eligible set is not an error; it yields the placeholder.
    pub fn resolve_top<R: Rng + ?Sized>(
        &self,
        ranked: &RankedPrediction,
        diet: DietType,
        k: usize,
        rng: &mut R,
    ) -> Result<Recommendation> {
        if ranked.is_empty() {
            return Err(DietPlanError::EmptyPrediction);
        }
        check_k(k, self.catalog_len)?;

        let eligible = self.eligible.for_diet(diet);
        let meals = ranked
            .top(k)
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                let (name, origin) = self.fill_slot(&candidate.name, diet, eligible, &mut *rng);
                RecommendedMeal {
                    rank: i + 1,
                    name,
                    origin,
                }
            })
            .collect();

        Ok(Recommendation { diet, meals })
    }

    fn fill_slot<R: Rng + ?Sized>(
        &self,
        candidate: &str,
        diet: DietType,
        eligible: &[String],
        rng: &mut R,
    ) -> (String, MealOrigin) {
        if self.policy.allows(diet, candidate) {
            return (candidate.to_string(), MealOrigin::Kept);
        }
        let predicted = candidate.to_string();
        match (eligible.choose(rng), self.placeholders.for_diet(diet)) {
            (Some(substitute), _) => (substitute.clone(), MealOrigin::Substituted { predicted }),
            (None, Some(placeholder)) => {
                (placeholder.to_string(), MealOrigin::Placeholder { predicted })
            }
            // only the non-vegetarian diet lacks a placeholder, and it allows every meal
            (None, None) => (predicted, MealOrigin::Kept),
        }
    }
}
