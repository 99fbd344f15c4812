//! Classifier output ranked by probability.

use serde::{Deserialize, Serialize};

use crate::catalog::MealCatalog;
use crate::{DietPlanError, Result};

/// A meal class with the probability the classifier assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMeal {
    pub name: String,
    pub probability: f32,
}

/// Meal classes ordered by descending probability.
///
/// Equal probabilities keep the classifier's own class order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedPrediction {
    meals: Vec<ScoredMeal>,
}

impl RankedPrediction {
    /// Decode a probability vector against the catalog and rank it.
    ///
    /// Index `i` of `probabilities` is class `i` of the catalog. A vector
    /// longer than the catalog names an index the decoder cannot map.
    pub fn from_probabilities(probabilities: &[f32], catalog: &MealCatalog) -> Result<Self> {
        if probabilities.len() > catalog.len() {
            return Err(DietPlanError::UnknownLabel {
                index: catalog.len(),
                known: catalog.len(),
            });
        }
        if let Some(bad) = probabilities.iter().position(|p| !p.is_finite()) {
            return Err(DietPlanError::Classifier(format!(
                "non-finite probability for class {bad}"
            )));
        }

        let mut meals: Vec<ScoredMeal> = probabilities
            .iter()
            .enumerate()
            .map(|(index, &probability)| {
                let name = catalog.name(index).ok_or(DietPlanError::UnknownLabel {
                    index,
                    known: catalog.len(),
                })?;
                Ok(ScoredMeal {
                    name: name.to_string(),
                    probability,
                })
            })
            .collect::<Result<_>>()?;

        // sort_by is stable: ties keep class order
        meals.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(Self { meals })
    }

    /// Build a ranking from already-ordered scored meals.
    pub fn from_scored(meals: Vec<ScoredMeal>) -> Self {
        Self { meals }
    }

    /// Build a ranking from names alone, highest first.
    ///
    /// Probabilities are unknown and recorded as zero.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            meals: names
                .into_iter()
                .map(|name| ScoredMeal {
                    name: name.into(),
                    probability: 0.0,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMeal> {
        self.meals.iter()
    }

    /// The first `k` entries (fewer if the ranking is shorter).
    pub fn top(&self, k: usize) -> &[ScoredMeal] {
        &self.meals[..k.min(self.meals.len())]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.meals.iter().map(|m| m.name.as_str())
    }
}
