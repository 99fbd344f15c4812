//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.dietplan/config.toml` (user)
//! 3. `/etc/dietplan/config.toml` (system)
//!
//! Every section is optional. Relative asset paths resolve against the
//! directory of the config file (or the working directory when running on
//! defaults).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::CacheConfig;
use crate::catalog::{EligibilityPolicy, ExclusionTokens, MealCatalog, TagTable};
use crate::classifier::{FeatureLayout, LinearClassifier, MealClassifier};
use crate::planner::DietPlanner;
use crate::resolver::{DEFAULT_TOP_K, Placeholders};
use crate::session::HistoryMode;
use crate::{DietPlanError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub eligibility: EligibilityConfig,
    #[serde(default)]
    pub cache: CacheSection,
    /// Directory relative asset paths resolve against.
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Model artifact locations.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Classifier artifact (default: `diet_plan_model.json`).
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    /// Label encoder artifact (default: `label_encoder.json`).
    #[serde(default = "default_labels_path")]
    pub labels: PathBuf,
    /// Classifier artifact format (default: linear).
    #[serde(default)]
    pub format: ModelFormat,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            labels: default_labels_path(),
            format: ModelFormat::default(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("diet_plan_model.json")
}

fn default_labels_path() -> PathBuf {
    PathBuf::from("label_encoder.json")
}

/// Supported classifier artifact formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// JSON logistic-regression weights.
    #[default]
    Linear,
    /// ONNX model (requires the `onnx` feature).
    Onnx,
}

/// Recommendation behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    /// Meals per recommendation (default: 3).
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub feature_layout: FeatureLayout,
    /// Substitution RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub history: HistoryMode,
    #[serde(default)]
    pub placeholders: Placeholders,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            feature_layout: FeatureLayout::default(),
            seed: None,
            history: HistoryMode::default(),
            placeholders: Placeholders::default(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Which eligibility rule to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Substring,
    Tagged,
}

/// Eligibility rule settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default = "default_vegetarian_exclude")]
    pub vegetarian_exclude: Vec<String>,
    #[serde(default = "default_vegan_exclude")]
    pub vegan_exclude: Vec<String>,
    /// Tag table artifact, required for the tagged policy.
    #[serde(default)]
    pub tag_table: Option<PathBuf>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            vegetarian_exclude: default_vegetarian_exclude(),
            vegan_exclude: default_vegan_exclude(),
            tag_table: None,
        }
    }
}

fn default_vegetarian_exclude() -> Vec<String> {
    ExclusionTokens::default().vegetarian
}

fn default_vegan_exclude() -> Vec<String> {
    ExclusionTokens::default().vegan
}

/// Prediction cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_entries() -> u64 {
    1024
}

fn default_ttl_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.dietplan/config.toml`
    /// 3. `/etc/dietplan/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?.ok_or_else(|| {
            DietPlanError::Configuration(
                "No config file found. Create ~/.dietplan/config.toml or /etc/dietplan/config.toml"
                    .to_string(),
            )
        })?;
        Self::load_file(&path)
    }

    /// Like [`load`](Self::load), but falls back to defaults rooted at the
    /// working directory when no config file exists anywhere.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_file(&path),
            None => {
                info!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration text, resolving relative paths against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| DietPlanError::Configuration(format!("Failed to parse config: {e}")))?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DietPlanError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut config: Self = toml::from_str(&content).map_err(|e| {
            DietPlanError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })?;
        config.base_dir = base_dir;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Resolve the config file path; `None` when no standard file exists.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(DietPlanError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".dietplan").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/dietplan/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Resolve a possibly relative asset path.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Build the configured eligibility policy, loading the tag table if needed.
    pub fn eligibility_policy(&self) -> Result<EligibilityPolicy> {
        match self.eligibility.policy {
            PolicyKind::Substring => Ok(EligibilityPolicy::Substring(ExclusionTokens {
                vegetarian: self.eligibility.vegetarian_exclude.clone(),
                vegan: self.eligibility.vegan_exclude.clone(),
            })),
            PolicyKind::Tagged => {
                let path = self.eligibility.tag_table.as_deref().ok_or_else(|| {
                    DietPlanError::Configuration(
                        "eligibility.policy = \"tagged\" requires eligibility.tag_table".to_string(),
                    )
                })?;
                TagTable::load(&self.resolve_path(path)).map(EligibilityPolicy::Tagged)
            }
        }
    }

    /// Prediction cache settings, or `None` when disabled.
    pub fn cache_config(&self) -> Option<CacheConfig> {
        self.cache.enabled.then(|| {
            CacheConfig::new()
                .max_entries(self.cache.max_entries)
                .ttl(Duration::from_secs(self.cache.ttl_secs))
        })
    }

    /// Load the label encoder artifact.
    pub fn load_catalog(&self) -> Result<MealCatalog> {
        MealCatalog::load(&self.resolve_path(&self.assets.labels))
    }

    /// Load the classifier artifact in the configured format.
    pub fn load_classifier(&self, n_classes: usize) -> Result<Box<dyn MealClassifier>> {
        let path = self.resolve_path(&self.assets.model);
        match self.assets.format {
            ModelFormat::Linear => {
                let classifier = LinearClassifier::load(&path)?;
                debug!(
                    classes = classifier.n_classes(),
                    expected = n_classes,
                    "loaded linear classifier"
                );
                Ok(Box::new(classifier))
            }
            #[cfg(feature = "onnx")]
            ModelFormat::Onnx => Ok(Box::new(crate::classifier::OnnxClassifier::load(
                &path,
                self.recommendation.feature_layout.len(),
                n_classes,
            )?)),
            #[cfg(not(feature = "onnx"))]
            ModelFormat::Onnx => Err(DietPlanError::Configuration(
                "assets.format = \"onnx\" requires building with the `onnx` feature".to_string(),
            )),
        }
    }

    /// Load every artifact and build a planner.
    pub fn build_planner(&self) -> Result<DietPlanner> {
        let catalog = self.load_catalog()?;
        let classifier = self.load_classifier(catalog.len())?;

        let mut builder = DietPlanner::builder()
            .boxed_classifier(classifier)
            .policy(self.eligibility_policy()?)
            .placeholders(self.recommendation.placeholders.clone())
            .top_k(self.recommendation.top_k)
            .feature_layout(self.recommendation.feature_layout)
            .catalog(catalog);

        if let Some(cache) = self.cache_config() {
            builder = builder.prediction_cache(cache);
        }
        if let Some(seed) = self.recommendation.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }
}
