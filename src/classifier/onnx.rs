//! Classifier backed by an ONNX Runtime session.
//!
//! Intended for scikit-learn models exported with `skl2onnx` and
//! `zipmap=False`, which take a `float_input` tensor of shape
//! `[1, n_features]` and emit a `probabilities` tensor of shape
//! `[1, n_classes]`.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use tracing::debug;

use super::{FeatureVector, MealClassifier};
use crate::{DietPlanError, Result};

const DEFAULT_INPUT: &str = "float_input";
const DEFAULT_OUTPUT: &str = "probabilities";

/// ONNX classifier.
pub struct OnnxClassifier {
    // ort sessions need exclusive access to run
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    n_features: usize,
    n_classes: usize,
}

impl OnnxClassifier {
    /// Load a model using the default skl2onnx tensor names.
    pub fn load(path: &Path, n_features: usize, n_classes: usize) -> Result<Self> {
        Self::load_with_names(path, n_features, n_classes, DEFAULT_INPUT, DEFAULT_OUTPUT)
    }

    /// Load a model with explicit input/output tensor names.
    pub fn load_with_names(
        path: &Path,
        n_features: usize,
        n_classes: usize,
        input_name: &str,
        output_name: &str,
    ) -> Result<Self> {
        let session = build_session(path)?;
        debug!(path = %path.display(), n_features, n_classes, "loaded onnx classifier");
        Ok(Self {
            session: Mutex::new(session),
            input_name: input_name.to_string(),
            output_name: output_name.to_string(),
            n_features,
            n_classes,
        })
    }
}

impl MealClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f32>> {
        use ort::value::TensorRef;

        if features.len() != self.n_features {
            return Err(DietPlanError::Classifier(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let input = features.as_f32();
        let shape = [1_usize, input.len()];
        let tensor = TensorRef::from_array_view((shape, input.as_slice())).map_err(|e| {
            DietPlanError::Classifier(format!("Failed to create input tensor: {}", e))
        })?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| DietPlanError::Classifier("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| DietPlanError::Classifier(format!("ONNX inference failed: {}", e)))?;

        let probabilities = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            DietPlanError::Classifier(format!("No '{}' output found", self.output_name))
        })?;

        let (_, data) = probabilities.try_extract_tensor::<f32>().map_err(|e| {
            DietPlanError::Classifier(format!("Failed to extract probabilities: {}", e))
        })?;

        Ok(data.to_vec())
    }
}

/// Build a CPU ONNX session; failures are [`DietPlanError::AssetUnavailable`].
fn build_session(model_path: &Path) -> Result<Session> {
    Session::builder()
        .map_err(|e| DietPlanError::asset("classifier", format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| DietPlanError::asset("classifier", format!("Failed to set optimization level: {}", e)))?
        .commit_from_file(model_path)
        .map_err(|e| {
            DietPlanError::asset(
                "classifier",
                format!("Failed to load ONNX model {}: {}", model_path.display(), e),
            )
        })
}
