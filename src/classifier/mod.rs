//! Classifier seam: feature encoding and probability-producing models.
//!
//! The planner only relies on [`MealClassifier`]: given a fixed-order
//! feature vector, return one probability per catalog class. How the model
//! was trained or serialized is the implementation's business.

mod linear;
#[cfg(feature = "onnx")]
mod onnx;

pub use linear::LinearClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::types::UserProfile;

/// Which codes make up a feature vector, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLayout {
    /// `[condition, macro, diet]`
    #[default]
    Standard,
    /// `[condition, macro, diet, diet_subtype]`
    DietSubtype,
}

impl FeatureLayout {
    /// Number of features this layout produces.
    pub const fn len(self) -> usize {
        match self {
            Self::Standard => 3,
            Self::DietSubtype => 4,
        }
    }

    /// Encode a profile's categorical selections.
    pub fn encode(self, profile: &UserProfile) -> FeatureVector {
        let mut codes = vec![
            profile.condition.code(),
            profile.macro_preference.code(),
            profile.diet.code(),
        ];
        if self == Self::DietSubtype {
            codes.push(profile.diet.subtype_code());
        }
        FeatureVector(codes)
    }
}

/// Encoded classifier input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector(pub Vec<i64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Features as `f32`, the dtype trained models expect.
    pub fn as_f32(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }
}

/// A trained model mapping feature vectors to class probabilities.
pub trait MealClassifier: Send + Sync {
    /// Short name for logs and metric labels.
    fn name(&self) -> &str;

    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Number of output classes.
    fn n_classes(&self) -> usize;

    /// One probability per class, in class-index order.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f32>>;
}

/// Softmax function.
pub(crate) fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|x| x / sum).collect()
}
