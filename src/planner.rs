//! The diet planner: profile in, meal plan out.
//!
//! Wires the pieces of one request together:
//!
//! ```text
//! UserProfile ─encode─▶ FeatureVector ─classify─▶ probabilities
//!     ─rank─▶ RankedPrediction ─resolve─▶ Recommendation ─▶ MealPlan
//! ```
//!
//! Classifier outputs go through the optional [`PredictionCache`]. The
//! caller's [`SessionHistory`] is only touched once the whole request has
//! succeeded.

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument, warn};

use crate::cache::{CacheConfig, PredictionCache};
use crate::catalog::{EligibilityPolicy, MealCatalog};
use crate::classifier::{FeatureLayout, FeatureVector, MealClassifier};
use crate::resolver::{DEFAULT_TOP_K, Placeholders, Resolver};
use crate::session::SessionHistory;
use crate::telemetry;
use crate::types::{DietType, MealPlan, RankedPrediction, Recommendation, UserProfile};
use crate::{DietPlanError, Result};

/// Builder for [`DietPlanner`].
pub struct DietPlannerBuilder {
    catalog: Option<MealCatalog>,
    classifier: Option<Box<dyn MealClassifier>>,
    policy: EligibilityPolicy,
    placeholders: Placeholders,
    top_k: usize,
    layout: FeatureLayout,
    cache: Option<CacheConfig>,
    seed: Option<u64>,
}

impl Default for DietPlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DietPlannerBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            classifier: None,
            policy: EligibilityPolicy::default(),
            placeholders: Placeholders::default(),
            top_k: DEFAULT_TOP_K,
            layout: FeatureLayout::default(),
            cache: None,
            seed: None,
        }
    }

    /// Set the meal catalog (the label decoder's class list).
    pub fn catalog(mut self, catalog: MealCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the classifier.
    pub fn classifier(mut self, classifier: impl MealClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Set an already boxed classifier.
    pub fn boxed_classifier(mut self, classifier: Box<dyn MealClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Set the eligibility rule.
    pub fn policy(mut self, policy: EligibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the placeholder names.
    pub fn placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Set how many meals to recommend.
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the feature layout the classifier was trained with.
    pub fn feature_layout(mut self, layout: FeatureLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable the prediction cache.
    pub fn prediction_cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    /// Seed the substitution RNG for reproducible output.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the planner.
    ///
    /// Fails with a configuration error when the catalog or classifier is
    /// missing or the classifier's input width disagrees with the layout.
    pub fn build(self) -> Result<DietPlanner> {
        let catalog = self
            .catalog
            .ok_or_else(|| DietPlanError::Configuration("no meal catalog configured".to_string()))?;
        let classifier = self
            .classifier
            .ok_or_else(|| DietPlanError::Configuration("no classifier configured".to_string()))?;

        if classifier.n_features() != self.layout.len() {
            return Err(DietPlanError::Configuration(format!(
                "classifier '{}' expects {} features but the {:?} layout produces {}",
                classifier.name(),
                classifier.n_features(),
                self.layout,
                self.layout.len()
            )));
        }
        if classifier.n_classes() != catalog.len() {
            // Requests fail with UnknownLabel if the model emits classes the
            // decoder lacks; a smaller model is usable as is.
            warn!(
                classifier = classifier.name(),
                classes = classifier.n_classes(),
                catalog = catalog.len(),
                "classifier and label encoder disagree on class count"
            );
        }

        let resolver = Resolver::builder(&catalog)
            .policy(self.policy)
            .placeholders(self.placeholders)
            .top_k(self.top_k)
            .build()?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(DietPlanner {
            catalog,
            classifier,
            resolver,
            layout: self.layout,
            cache: self.cache.as_ref().map(PredictionCache::new),
            rng,
        })
    }
}

/// Produces meal plans for user profiles.
pub struct DietPlanner {
    catalog: MealCatalog,
    classifier: Box<dyn MealClassifier>,
    resolver: Resolver,
    layout: FeatureLayout,
    cache: Option<PredictionCache>,
    rng: StdRng,
}

impl DietPlanner {
    /// Create a new builder.
    pub fn builder() -> DietPlannerBuilder {
        DietPlannerBuilder::new()
    }

    pub fn catalog(&self) -> &MealCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn feature_layout(&self) -> FeatureLayout {
        self.layout
    }

    /// Eligible catalog meals for a diet type.
    pub fn eligible_meals(&self, diet: DietType) -> &[String] {
        self.resolver.eligible(diet)
    }

    /// Produce a meal plan and record it into `session`.
    ///
    /// On error the session is left exactly as it was.
    #[instrument(skip(self, profile, session), fields(diet = %profile.diet, macro_preference = %profile.macro_preference))]
    pub fn recommend(
        &mut self,
        profile: &UserProfile,
        session: &mut SessionHistory,
    ) -> Result<MealPlan> {
        let plan = self.plan(profile)?;
        session.record(plan.recommendation.clone());
        Ok(plan)
    }

    /// Produce a meal plan without touching any history.
    pub fn plan(&mut self, profile: &UserProfile) -> Result<MealPlan> {
        let result = self
            .rank(profile)
            .and_then(|ranked| self.resolve(&ranked, profile.diet));
        Self::record_request(profile.diet, &result);

        let recommendation = result?;
        debug!(meals = ?recommendation.names(), "resolved recommendation");
        Ok(MealPlan {
            health: profile.health(),
            macro_preference: profile.macro_preference,
            recommendation,
        })
    }

    /// Classify a profile and rank the catalog by probability.
    pub fn rank(&self, profile: &UserProfile) -> Result<RankedPrediction> {
        let features = self.layout.encode(profile);
        let probabilities = self.predict(features)?;
        RankedPrediction::from_probabilities(&probabilities, &self.catalog)
    }

    /// Resolve a ranking for `diet` with the planner's RNG.
    pub fn resolve(&mut self, ranked: &RankedPrediction, diet: DietType) -> Result<Recommendation> {
        self.resolver.resolve(ranked, diet, &mut self.rng)
    }

    fn predict(&self, features: FeatureVector) -> Result<Arc<Vec<f32>>> {
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(&features)
        {
            return Ok(hit);
        }

        let start = Instant::now();
        let probabilities = Arc::new(self.classifier.predict_proba(&features)?);
        metrics::histogram!(telemetry::CLASSIFY_DURATION_SECONDS,
            "classifier" => self.classifier.name().to_owned(),
        )
        .record(start.elapsed().as_secs_f64());

        if let Some(cache) = &self.cache {
            cache.insert(features, Arc::clone(&probabilities));
        }
        Ok(probabilities)
    }

    /// Record request outcome metrics.
    fn record_request(diet: DietType, result: &Result<Recommendation>) {
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::RECOMMENDATIONS_TOTAL,
            "diet" => diet.as_str(),
            "status" => status,
        )
        .increment(1);

        if let Ok(recommendation) = result {
            let substitutions = recommendation.substitutions() as u64;
            let placeholders = recommendation.placeholders() as u64;
            if substitutions > 0 {
                metrics::counter!(telemetry::SUBSTITUTIONS_TOTAL, "diet" => diet.as_str())
                    .increment(substitutions);
            }
            if placeholders > 0 {
                metrics::counter!(telemetry::PLACEHOLDERS_TOTAL, "diet" => diet.as_str())
                    .increment(placeholders);
            }
        }
    }
}
