//! Multinomial logistic-regression classifier stored as JSON.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "weights": [[0.4, -1.2, 0.9], [..], ..],
//!   "bias": [0.1, ..]
//! }
//! ```
//!
//! `weights` has one row per class and one column per feature. Scores are
//! `softmax(W·x + b)`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureVector, MealClassifier, softmax};
use crate::{DietPlanError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearArtifact {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

/// Linear softmax classifier.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    n_features: usize,
}

impl LinearClassifier {
    /// Create a classifier from a weight matrix (classes × features) and
    /// per-class bias.
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>) -> Result<Self> {
        let n_features = weights.first().map(Vec::len).unwrap_or(0);
        if weights.is_empty() || n_features == 0 {
            return Err(DietPlanError::InvalidInput(
                "weight matrix must have at least one class and one feature".to_string(),
            ));
        }
        if let Some(row) = weights.iter().position(|r| r.len() != n_features) {
            return Err(DietPlanError::InvalidInput(format!(
                "weight row {row} has {} features, expected {n_features}",
                weights[row].len()
            )));
        }
        if bias.len() != weights.len() {
            return Err(DietPlanError::InvalidInput(format!(
                "bias has {} entries for {} classes",
                bias.len(),
                weights.len()
            )));
        }
        Ok(Self {
            weights,
            bias,
            n_features,
        })
    }

    /// Load a JSON artifact; failures are [`DietPlanError::AssetUnavailable`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DietPlanError::asset("classifier", format!("{}: {e}", path.display())))?;
        let artifact: LinearArtifact = serde_json::from_str(&content)
            .map_err(|e| DietPlanError::asset("classifier", format!("{}: {e}", path.display())))?;
        let model = Self::new(artifact.weights, artifact.bias)
            .map_err(|e| DietPlanError::asset("classifier", format!("{}: {e}", path.display())))?;
        debug!(
            path = %path.display(),
            classes = model.n_classes(),
            features = model.n_features,
            "loaded linear classifier"
        );
        Ok(model)
    }
}

impl MealClassifier for LinearClassifier {
    fn name(&self) -> &str {
        "linear"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f32>> {
        if features.len() != self.n_features {
            return Err(DietPlanError::Classifier(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        let x = features.as_f32();
        let logits: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(&x).map(|(w, v)| w * v).sum::<f32>() + b)
            .collect();
        Ok(softmax(&logits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_weights() {
        let err = LinearClassifier::new(vec![vec![1.0, 0.0], vec![1.0]], vec![0.0, 0.0]).unwrap_err();
        assert!(err.to_string().contains("weight row 1"));
    }

    #[test]
    fn rejects_bias_mismatch() {
        assert!(LinearClassifier::new(vec![vec![1.0]], vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn bias_only_model_prefers_largest_bias() {
        let model = LinearClassifier::new(
            vec![vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]],
            vec![0.0, 2.0, 1.0],
        )
        .unwrap();
        let probs = model.predict_proba(&FeatureVector(vec![1, 2, 0])).unwrap();
        assert_eq!(probs.len(), 3);
        assert!(probs[1] > probs[2] && probs[2] > probs[0]);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn features_shift_the_ranking() {
        // class 1 grows with the diet code (third feature)
        let model = LinearClassifier::new(
            vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 3.0]],
            vec![1.0, 0.0],
        )
        .unwrap();
        let vegetarian = model.predict_proba(&FeatureVector(vec![0, 0, 0])).unwrap();
        let vegan = model.predict_proba(&FeatureVector(vec![0, 0, 2])).unwrap();
        assert!(vegetarian[0] > vegetarian[1]);
        assert!(vegan[1] > vegan[0]);
    }

    #[test]
    fn wrong_feature_count_is_classifier_error() {
        let model = LinearClassifier::new(vec![vec![0.0; 3]], vec![0.0]).unwrap();
        let err = model.predict_proba(&FeatureVector(vec![0, 1])).unwrap_err();
        assert!(matches!(err, DietPlanError::Classifier(_)));
    }
}
