//! The meal catalog: the classifier's ordered output classes.
//!
//! The catalog doubles as the label decoder. Class index `i` of a
//! probability vector is `catalog.name(i)`. It is loaded from a JSON label
//! encoder artifact of the form `{"classes": ["Meal A", "Meal B", ...]}`.

mod eligibility;

pub use eligibility::{EligibilityPolicy, EligibleSets, ExclusionTokens, IngredientTag, TagTable};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DietPlanError, Result};

/// Serialized form of the label encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabelEncoderArtifact {
    classes: Vec<String>,
}

/// Ordered, immutable set of unique meal names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealCatalog {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl MealCatalog {
    /// Build a catalog from class names in classifier order.
    ///
    /// Rejects an empty class list, empty names and duplicates.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(DietPlanError::InvalidInput(
                "meal catalog has no classes".to_string(),
            ));
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DietPlanError::InvalidInput(format!(
                    "meal class {i} has an empty name"
                )));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(DietPlanError::InvalidInput(format!(
                    "duplicate meal class '{name}'"
                )));
            }
        }
        Ok(Self { names, index })
    }

    /// Load the label encoder artifact.
    ///
    /// Any failure (missing file, bad JSON, invalid class list) is reported
    /// as [`DietPlanError::AssetUnavailable`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DietPlanError::asset("label encoder", format!("{}: {e}", path.display())))?;
        let artifact: LabelEncoderArtifact = serde_json::from_str(&content)
            .map_err(|e| DietPlanError::asset("label encoder", format!("{}: {e}", path.display())))?;
        let catalog = Self::new(artifact.classes)
            .map_err(|e| DietPlanError::asset("label encoder", format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), classes = catalog.len(), "loaded label encoder");
        Ok(catalog)
    }

    /// Meal name for a class index.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Class index of a meal name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_class_order() {
        let catalog = MealCatalog::new(["b", "a", "c"]).unwrap();
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(catalog.position("a"), Some(1));
        assert_eq!(catalog.name(2), Some("c"));
        assert_eq!(catalog.name(3), None);
    }

    #[test]
    fn rejects_duplicates() {
        let err = MealCatalog::new(["Oatmeal", "Oatmeal"]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_blank_names() {
        assert!(MealCatalog::new(["Oatmeal", "  "]).is_err());
    }

    #[test]
    fn rejects_empty_class_list() {
        let err = MealCatalog::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, DietPlanError::InvalidInput(_)));
    }

    #[test]
    fn load_empty_encoder_is_asset_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_encoder.json");
        std::fs::write(&path, r#"{"classes": []}"#).unwrap();

        let err = MealCatalog::load(&path).unwrap_err();
        assert!(matches!(err, DietPlanError::AssetUnavailable { .. }));
        assert!(err.to_string().contains("no classes"));
    }

    #[test]
    fn load_missing_file_is_asset_unavailable() {
        let err = MealCatalog::load(Path::new("/nonexistent/label_encoder.json")).unwrap_err();
        assert!(matches!(err, DietPlanError::AssetUnavailable { .. }));
        assert!(err.is_fatal());
    }
}
